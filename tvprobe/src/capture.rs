//! Snapshot persistence and the capture step of the interactive loop.
//!
//! A snapshot is an opaque XML blob; nothing here interprets its structure.
//! Two persistence policies exist: append everything to one running file, or
//! write a new timestamped file only when the text actually changed.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;

use chrono::Local;
use tracing::{debug, info};

use crate::errors::CaptureError;
use crate::session::DeviceSession;

/// How fetched snapshots are written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// Every snapshot is appended to one file whose name is fixed at the
    /// first fetch.
    Append,
    /// A new timestamped file per changed snapshot; identical snapshots are
    /// not written.
    ChangeGated,
}

/// What one capture step did with the fetched snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Snapshot written to a new file.
    Written(PathBuf),
    /// Snapshot appended to the running log file.
    Appended(PathBuf),
    /// Snapshot identical to the last saved one; nothing written.
    Unchanged,
}

/// Persists snapshots into a directory according to a [`PersistMode`].
pub struct SnapshotRecorder {
    mode: PersistMode,
    dir: PathBuf,
    last_saved: Option<String>,
    append_path: Option<PathBuf>,
}

impl SnapshotRecorder {
    pub fn new(mode: PersistMode, dir: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            dir: dir.into(),
            last_saved: None,
            append_path: None,
        }
    }

    pub fn mode(&self) -> PersistMode {
        self.mode
    }

    /// The last snapshot that was persisted, if any.
    pub fn last_saved(&self) -> Option<&str> {
        self.last_saved.as_deref()
    }

    /// Record one fetched snapshot.
    pub fn record(&mut self, snapshot: &str) -> Result<CaptureOutcome, CaptureError> {
        match self.mode {
            PersistMode::Append => self.append(snapshot),
            PersistMode::ChangeGated => self.write_if_changed(snapshot),
        }
    }

    fn append(&mut self, snapshot: &str) -> Result<CaptureOutcome, CaptureError> {
        let path = match &self.append_path {
            Some(path) => path.clone(),
            None => {
                let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
                let path = self.dir.join(format!("get_page_source_{stamp}.xml"));
                self.append_path = Some(path.clone());
                path
            }
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| CaptureError::FileWrite {
                path: path.clone(),
                source: e,
            })?;
        file.write_all(snapshot.as_bytes())
            .map_err(|e| CaptureError::FileWrite {
                path: path.clone(),
                source: e,
            })?;

        self.last_saved = Some(snapshot.to_string());
        debug!(path = %path.display(), "snapshot appended");
        Ok(CaptureOutcome::Appended(path))
    }

    fn write_if_changed(&mut self, snapshot: &str) -> Result<CaptureOutcome, CaptureError> {
        if self.last_saved.as_deref() == Some(snapshot) {
            debug!("page source unchanged, skipping write");
            return Ok(CaptureOutcome::Unchanged);
        }

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        // Two different snapshots inside the same second would otherwise
        // collide on the timestamp.
        let mut path = self.dir.join(format!("page_source_{stamp}.xml"));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("page_source_{stamp}_{n}.xml"));
            n += 1;
        }

        std::fs::write(&path, snapshot).map_err(|e| CaptureError::FileWrite {
            path: path.clone(),
            source: e,
        })?;

        self.last_saved = Some(snapshot.to_string());
        info!(path = %path.display(), "page source saved");
        Ok(CaptureOutcome::Written(path))
    }
}

/// True when `input` is the quit token (`q`, any case).
pub fn is_quit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("q")
}

/// One iteration of the interactive loop: fetch the page source and persist
/// it. In change-gated mode an unchanged snapshot triggers one
/// [`refresh_probe`] before "no change" is reported, on platforms that can
/// take key input.
pub async fn capture_step(
    session: &DeviceSession,
    recorder: &mut SnapshotRecorder,
) -> Result<CaptureOutcome, CaptureError> {
    let snapshot = session.page_source().await?;
    let outcome = recorder.record(&snapshot)?;
    match outcome {
        CaptureOutcome::Unchanged if session.platform().supports_key_input() => {
            refresh_probe(session, recorder).await
        }
        outcome => Ok(outcome),
    }
}

/// Wake the device UI with a Down/Up round trip, then fetch once more. The
/// re-fetched snapshot is persisted only if the screen actually changed;
/// otherwise nothing is written and the last saved snapshot stays as it was.
pub async fn refresh_probe(
    session: &DeviceSession,
    recorder: &mut SnapshotRecorder,
) -> Result<CaptureOutcome, CaptureError> {
    debug!("refresh probe: pressing Down then Up");
    session.press_key("Down").await?;
    session.press_key("Up").await?;
    let snapshot = session.page_source().await?;
    recorder.record(&snapshot)
}
