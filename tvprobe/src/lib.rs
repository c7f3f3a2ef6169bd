//! Remote page-source capture for TV devices
//!
//! This crate drives a device hosted on a commercial device cloud through its
//! Appium-compatible WebDriver endpoint: open a session, pull the on-screen
//! UI hierarchy ("page source") as an XML document, and, for Roku devices,
//! send simulated remote-control key presses.
//!
//! All remote traffic goes through the [`DriverBackend`] trait so the capture
//! and persistence logic can be exercised against an in-memory fake.

pub mod capabilities;
pub mod capture;
pub mod config;
pub mod errors;
pub mod keys;
pub mod session;
#[cfg(test)]
mod tests;

pub use capabilities::Platform;
pub use capture::{capture_step, is_quit, CaptureOutcome, PersistMode, SnapshotRecorder};
pub use config::CloudConfig;
pub use errors::CaptureError;
pub use session::{DeviceSession, DriverBackend};
