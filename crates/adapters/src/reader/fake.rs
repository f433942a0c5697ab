// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake source reader for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ListedDir, SkippedPath, SourceBatch, SourceDescriptor, SourceReader, SourceText};
use async_trait::async_trait;
use cf_core::{CronSource, SourceError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Recorded read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCall {
    pub host: String,
    pub source: CronSource,
}

struct FakeReaderState {
    result: Result<SourceBatch, SourceError>,
    delay: Option<Duration>,
    panics: bool,
    calls: Vec<ReadCall>,
}

/// Fake reader returning a canned batch or error
#[derive(Clone)]
pub struct FakeSourceReader {
    descriptor: SourceDescriptor,
    timeout: Duration,
    inner: Arc<Mutex<FakeReaderState>>,
}

impl FakeSourceReader {
    /// A reader for `source` that returns an empty batch.
    pub fn new(source: CronSource) -> Self {
        Self {
            descriptor: SourceDescriptor::local(
                source,
                format!("/fixture/{}", source.as_str().to_ascii_lowercase()),
                "root",
            ),
            timeout: Duration::from_secs(1),
            inner: Arc::new(Mutex::new(FakeReaderState {
                result: Ok(SourceBatch::default()),
                delay: None,
                panics: false,
                calls: Vec::new(),
            })),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.descriptor.host = host.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.descriptor.owner = owner.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.descriptor.location = location.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Append a text at the reader's own location.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        let origin = self.descriptor.location.clone();
        self.with_text_at(origin, text)
    }

    /// Append a text attributed to `origin_path`.
    pub fn with_text_at(self, origin_path: impl Into<String>, text: impl Into<String>) -> Self {
        if let Ok(batch) = &mut self.inner.lock().result {
            batch.texts.push(SourceText::new(origin_path, text));
        }
        self
    }

    /// Record a directory as enumerated, under its read and host paths.
    pub fn with_listed_dir(self, path: impl Into<String>, host_path: impl Into<String>) -> Self {
        if let Ok(batch) = &mut self.inner.lock().result {
            batch.listed_dirs.push(ListedDir::new(path, host_path));
        }
        self
    }

    pub fn with_skipped(self, path: impl Into<String>, reason: SourceError) -> Self {
        if let Ok(batch) = &mut self.inner.lock().result {
            batch.skipped.push(SkippedPath {
                path: path.into(),
                reason,
            });
        }
        self
    }

    /// Fail every read with `err`.
    pub fn failing(self, err: SourceError) -> Self {
        self.inner.lock().result = Err(err);
        self
    }

    /// Sleep before answering, to exercise timeouts.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.inner.lock().delay = Some(delay);
        self
    }

    /// Panic inside `read`, to exercise task isolation.
    pub fn panicking(self) -> Self {
        self.inner.lock().panics = true;
        self
    }

    /// Get all recorded reads
    pub fn calls(&self) -> Vec<ReadCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl SourceReader for FakeSourceReader {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    #[allow(clippy::panic)]
    async fn read(&self) -> Result<SourceBatch, SourceError> {
        let (delay, panics, result) = {
            let mut state = self.inner.lock();
            state.calls.push(ReadCall {
                host: self.descriptor.host.clone(),
                source: self.descriptor.source,
            });
            (state.delay, state.panics, state.result.clone())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if panics {
            panic!("fake reader panicked");
        }
        result
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
