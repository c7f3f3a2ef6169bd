//! Capability descriptors negotiated with the device cloud.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thirtyfour::Capabilities;

use crate::config::CloudConfig;

/// Seconds of idleness before the cloud reclaims the session.
const NEW_COMMAND_TIMEOUT_SECS: u32 = 300;

/// Target platform for a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    TizenTv,
    Roku,
}

impl Platform {
    /// Only Roku sessions accept simulated remote-control key presses.
    pub fn supports_key_input(&self) -> bool {
        matches!(self, Platform::Roku)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::TizenTv => write!(f, "tizentv"),
            Platform::Roku => write!(f, "roku"),
        }
    }
}

/// Build the capability map requested when the session is created.
///
/// The vendor flags are the same on every platform: a 300 second idle
/// timeout, an exclusive control lock on the device, and no automatic retry
/// when session creation fails.
pub fn capabilities_for(config: &CloudConfig) -> Capabilities {
    let mut caps = Capabilities::new();
    match config.platform {
        Platform::TizenTv => {
            caps.insert("platformName".to_string(), json!("tizentv"));
            caps.insert("appium:deviceName".to_string(), json!("SamsungTV"));
            caps.insert("appium:automationName".to_string(), json!("tizentv"));
            if let Some(udid) = &config.udid {
                caps.insert("appium:udid".to_string(), json!(udid));
            }
        }
        Platform::Roku => {
            caps.insert("platformName".to_string(), json!("roku"));
            caps.insert("appium:deviceName".to_string(), json!("roku"));
            caps.insert("appium:automationName".to_string(), json!("roku"));
            if let Some(selector) = &config.device_selector {
                caps.insert("headspin:selector".to_string(), json!(selector));
            }
        }
    }
    caps.insert("headspin:app.id".to_string(), json!(config.app_id));
    caps.insert(
        "appium:newCommandTimeout".to_string(),
        json!(NEW_COMMAND_TIMEOUT_SECS),
    );
    caps.insert("headspin:controlLock".to_string(), json!(true));
    caps.insert("headspin:retryNewSessionFailure".to_string(), json!(false));
    caps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tizen_config() -> CloudConfig {
        CloudConfig {
            platform: Platform::TizenTv,
            api_token: "token".to_string(),
            app_id: "com.example.app".to_string(),
            udid: Some("device-1234".to_string()),
            device_selector: None,
        }
    }

    #[test]
    fn tizen_capabilities_pin_the_device() {
        let caps = capabilities_for(&tizen_config());
        assert_eq!(caps["platformName"], json!("tizentv"));
        assert_eq!(caps["appium:deviceName"], json!("SamsungTV"));
        assert_eq!(caps["appium:udid"], json!("device-1234"));
        assert_eq!(caps["headspin:app.id"], json!("com.example.app"));
    }

    #[test]
    fn roku_capabilities_carry_the_pool_selector() {
        let config = CloudConfig {
            platform: Platform::Roku,
            api_token: "token".to_string(),
            app_id: "12345".to_string(),
            udid: None,
            device_selector: Some("sku:3920X".to_string()),
        };
        let caps = capabilities_for(&config);
        assert_eq!(caps["platformName"], json!("roku"));
        assert_eq!(caps["headspin:selector"], json!("sku:3920X"));
        assert!(!caps.contains_key("appium:udid"));
    }

    #[test]
    fn session_flags_are_always_present() {
        let caps = capabilities_for(&tizen_config());
        assert_eq!(caps["appium:newCommandTimeout"], json!(300));
        assert_eq!(caps["headspin:controlLock"], json!(true));
        assert_eq!(caps["headspin:retryNewSessionFailure"], json!(false));
    }
}
