use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to create device session: {0}")]
    SessionCreation(String),

    #[error("Failed to fetch page source: {0}")]
    SnapshotFetch(String),

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid key '{key}'. Supported keys: {}", crate::keys::SUPPORTED_KEYS.join(", "))]
    InvalidKey { key: String },

    #[error("Remote command failed: {0}")]
    VendorCommand(String),

    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),
}
