// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source readers: fetch raw crontab text from files, directories and commands

mod command;
mod file;
mod local;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use command::CrontabCommandReader;
pub use file::{CronDirReader, CrontabFileReader, RunPartsReader};
pub use local::{local_readers, LocalLayout};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSourceReader, ReadCall};

use async_trait::async_trait;
use cf_core::{CronSource, SourceError, LOCAL_HOST};
use std::time::Duration;

/// Identity of one configured source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub host: String,
    pub source: CronSource,
    /// Path or command line the reader fetches from
    pub location: String,
    /// Owner for entries whose format has no user field
    pub owner: String,
}

impl SourceDescriptor {
    pub fn local(source: CronSource, location: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            host: LOCAL_HOST.to_string(),
            source,
            location: location.into(),
            owner: owner.into(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }
}

/// One unit of text fetched from a source, tagged with where it came from.
///
/// A run-parts script is its own unit: `origin_path` is the script and the
/// text is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub origin_path: String,
    pub text: String,
}

impl SourceText {
    pub fn new(origin_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin_path: origin_path.into(),
            text: text.into(),
        }
    }
}

/// A path inside a source that could not be read while its siblings could.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    pub path: String,
    pub reason: SourceError,
}

/// A directory whose contents a read enumerated in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedDir {
    /// Where the directory was read from
    pub path: String,
    /// The same directory as the host's own crontabs name it. Differs from
    /// `path` when the etc tree is read from a relocated root.
    pub host_path: String,
}

impl ListedDir {
    pub fn new(path: impl Into<String>, host_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            host_path: host_path.into(),
        }
    }
}

/// Everything a single read produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBatch {
    pub texts: Vec<SourceText>,
    pub skipped: Vec<SkippedPath>,
    pub listed_dirs: Vec<ListedDir>,
}

impl SourceBatch {
    pub fn single(origin_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            texts: vec![SourceText::new(origin_path, text)],
            ..Self::default()
        }
    }
}

/// Adapter for one cron source.
///
/// Readers do no parsing. A read either yields text (possibly with some
/// sub-paths skipped) or fails as a whole; the aggregator turns failures
/// into `SourceUnavailable` diagnostics.
#[async_trait]
pub trait SourceReader: Send + Sync + 'static {
    fn descriptor(&self) -> &SourceDescriptor;

    /// Upper bound the aggregator enforces on `read`.
    fn timeout(&self) -> Duration {
        crate::env::file_timeout()
    }

    async fn read(&self) -> Result<SourceBatch, SourceError>;
}

/// Decode source bytes, replacing invalid UTF-8 rather than rejecting the file.
pub(crate) fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
