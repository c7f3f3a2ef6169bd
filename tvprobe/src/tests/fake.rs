use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::CaptureError;
use crate::session::DriverBackend;

/// Scripted in-memory backend. Hands out queued page sources in order,
/// repeating the last one once the queue runs dry, and records every vendor
/// command it is asked to run.
pub struct FakeBackend {
    sources: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
    pub commands: Mutex<Vec<(String, Vec<Value>)>>,
    pub quit_calls: AtomicUsize,
    pub fail_execute: bool,
}

impl FakeBackend {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: Mutex::new(sources.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
            commands: Mutex::new(Vec::new()),
            quit_calls: AtomicUsize::new(0),
            fail_execute: false,
        }
    }

    pub fn failing_execute(mut self) -> Self {
        self.fail_execute = true;
        self
    }

    pub fn command_count(&self) -> usize {
        self.commands.lock().unwrap().len()
    }
}

#[async_trait]
impl DriverBackend for FakeBackend {
    async fn page_source(&self) -> Result<String, CaptureError> {
        let mut sources = self.sources.lock().unwrap();
        match sources.pop_front() {
            Some(source) => {
                *self.last.lock().unwrap() = Some(source.clone());
                Ok(source)
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| CaptureError::SnapshotFetch("no source scripted".to_string())),
        }
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<(), CaptureError> {
        if self.fail_execute {
            return Err(CaptureError::VendorCommand("scripted failure".to_string()));
        }
        self.commands
            .lock()
            .unwrap()
            .push((script.to_string(), args));
        Ok(())
    }

    async fn quit(&self) -> Result<(), CaptureError> {
        self.quit_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
