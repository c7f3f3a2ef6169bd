//! Startup configuration resolved from the process environment.

use std::env;

use crate::capabilities::Platform;
use crate::errors::CaptureError;

/// Host of the device cloud's Appium load balancer.
const ALB_HOST: &str = "appium-dev.headspin.io";

/// Everything needed to open a session, validated up front. Constructed once
/// at startup and passed by reference; never read from the environment after
/// that.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    pub platform: Platform,
    /// Auth token embedded in the endpoint URL.
    pub api_token: String,
    /// Application under test (`headspin:app.id`).
    pub app_id: String,
    /// Device pin, required on Tizen.
    pub udid: Option<String>,
    /// Optional device-pool filter (`headspin:selector`), e.g. a SKU pattern.
    pub device_selector: Option<String>,
}

impl CloudConfig {
    /// Read the configuration for `platform` from the environment. Missing or
    /// empty required variables fail before any network traffic happens.
    pub fn from_env(platform: Platform) -> Result<Self, CaptureError> {
        let api_token = required_var("HEADSPIN_API_TOKEN")?;
        let app_id = required_var("APP_ID")?;
        let udid = match platform {
            Platform::TizenTv => Some(required_var("UDID")?),
            Platform::Roku => None,
        };
        let device_selector = env::var("DEVICE_SELECTOR").ok().filter(|v| !v.is_empty());

        Ok(Self {
            platform,
            api_token,
            app_id,
            udid,
            device_selector,
        })
    }

    /// Appium load-balancer endpoint with the auth token embedded.
    pub fn endpoint(&self) -> String {
        format!("https://{ALB_HOST}:443/v0/{}/wd/hub", self.api_token)
    }
}

fn required_var(name: &'static str) -> Result<String, CaptureError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(CaptureError::MissingEnv(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_embeds_the_token() {
        let config = CloudConfig {
            platform: Platform::Roku,
            api_token: "abc123".to_string(),
            app_id: "12345".to_string(),
            udid: None,
            device_selector: None,
        };
        assert_eq!(
            config.endpoint(),
            "https://appium-dev.headspin.io:443/v0/abc123/wd/hub"
        );
    }
}
