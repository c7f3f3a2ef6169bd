//! Remote session plumbing.
//!
//! All WebDriver traffic goes through the [`DriverBackend`] trait so that the
//! capture logic can run against an in-memory fake in tests. The only real
//! implementation wraps a `thirtyfour` session against the device cloud's
//! load balancer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use thirtyfour::WebDriver;
use tracing::{info, instrument};

use crate::capabilities::{capabilities_for, Platform};
use crate::config::CloudConfig;
use crate::errors::CaptureError;
use crate::keys;

/// Time given to the device UI to settle after a key press.
pub const KEY_SETTLE: Duration = Duration::from_secs(1);

/// The operations a capture session needs from the remote driver.
#[async_trait]
pub trait DriverBackend: Send + Sync {
    /// Serialize the current UI hierarchy as XML.
    async fn page_source(&self) -> Result<String, CaptureError>;

    /// Run a vendor script command against the session.
    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<(), CaptureError>;

    /// Release the remote session.
    async fn quit(&self) -> Result<(), CaptureError>;
}

/// `DriverBackend` over a live WebDriver session.
struct WebDriverBackend {
    driver: WebDriver,
}

#[async_trait]
impl DriverBackend for WebDriverBackend {
    async fn page_source(&self) -> Result<String, CaptureError> {
        self.driver
            .source()
            .await
            .map_err(|e| CaptureError::SnapshotFetch(e.to_string()))
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<(), CaptureError> {
        self.driver
            .execute(script, args)
            .await
            .map(|_| ())
            .map_err(|e| CaptureError::VendorCommand(e.to_string()))
    }

    async fn quit(&self) -> Result<(), CaptureError> {
        // WebDriver::quit consumes the handle; the clone shares the session.
        self.driver
            .clone()
            .quit()
            .await
            .map_err(|e| CaptureError::VendorCommand(e.to_string()))
    }
}

/// A live capture session against a single remote device. At most one exists
/// per process; [`DeviceSession::close`] consumes the handle, so the session
/// cannot be released twice.
pub struct DeviceSession {
    backend: Arc<dyn DriverBackend>,
    platform: Platform,
}

impl DeviceSession {
    /// Open a session on the device cloud. An error here means no further
    /// operations are possible and the interactive loop must not start.
    #[instrument(skip(config), fields(platform = %config.platform))]
    pub async fn open(config: &CloudConfig) -> Result<Self, CaptureError> {
        let endpoint = config.endpoint();
        let caps = capabilities_for(config);
        let driver = WebDriver::new(endpoint.as_str(), caps)
            .await
            .map_err(|e| CaptureError::SessionCreation(e.to_string()))?;
        info!(session_id = %driver.session_id(), "device session started");

        Ok(Self {
            backend: Arc::new(WebDriverBackend { driver }),
            platform: config.platform,
        })
    }

    /// Wrap an already-built backend. Used by tests with a scripted fake.
    pub fn from_backend(backend: Arc<dyn DriverBackend>, platform: Platform) -> Self {
        Self { backend, platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Fetch the current UI hierarchy as XML text.
    pub async fn page_source(&self) -> Result<String, CaptureError> {
        self.backend.page_source().await
    }

    /// Send a remote-control key press and wait for the UI to settle. The
    /// key name is validated locally before anything goes over the wire;
    /// remote failures surface as [`CaptureError::VendorCommand`].
    #[instrument(skip(self))]
    pub async fn press_key(&self, key: &str) -> Result<(), CaptureError> {
        let key = keys::validate_key(key)?;
        self.backend
            .execute("roku: pressKey", vec![json!({ "key": key })])
            .await?;
        tokio::time::sleep(KEY_SETTLE).await;
        Ok(())
    }

    /// Release the remote session.
    pub async fn close(self) -> Result<(), CaptureError> {
        self.backend.quit().await
    }
}
