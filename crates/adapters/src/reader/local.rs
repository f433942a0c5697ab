// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The standard set of readers for the local host

use super::{CronDirReader, CrontabCommandReader, CrontabFileReader, RunPartsReader, SourceReader};
use crate::traced::TracedReader;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Where the local cron sources live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalLayout {
    /// Root holding `crontab`, `cron.d` and the `cron.<period>` dirs
    pub etc_dir: PathBuf,
    pub crontab_bin: String,
    /// `None` runs the root listing without privilege escalation
    pub sudo_bin: Option<String>,
    /// Invoking user's login name, when the environment names one
    pub user: Option<String>,
    /// Read the invoking user's crontab
    pub user_crontab: bool,
    pub file_timeout: Duration,
    pub crontab_timeout: Duration,
}

impl Default for LocalLayout {
    fn default() -> Self {
        let user = crate::env::current_user();
        let sudo_bin = match user.as_deref() {
            Some("root") => None,
            _ => Some("sudo".to_string()),
        };
        Self {
            etc_dir: PathBuf::from("/etc"),
            crontab_bin: "crontab".to_string(),
            sudo_bin,
            user,
            user_crontab: true,
            file_timeout: crate::env::file_timeout(),
            crontab_timeout: crate::env::crontab_timeout(),
        }
    }
}

/// Readers for every local source, in reporting order: user crontab, root
/// crontab, system crontab, `cron.d`, run-parts directories.
///
/// The root reader is always built; whether it runs is the aggregator's call.
pub fn local_readers(layout: &LocalLayout) -> Vec<Arc<dyn SourceReader>> {
    let mut readers: Vec<Arc<dyn SourceReader>> = Vec::new();

    if layout.user_crontab {
        // `crontab -l` needs no name; entries just go unattributed without one
        let owner = layout.user.clone().unwrap_or_default();
        readers.push(Arc::new(TracedReader::new(
            CrontabCommandReader::user(&layout.crontab_bin, owner)
                .with_timeout(layout.crontab_timeout),
        )));
    }
    readers.push(Arc::new(TracedReader::new(
        CrontabCommandReader::root(&layout.crontab_bin, layout.sudo_bin.clone())
            .with_timeout(layout.crontab_timeout),
    )));
    readers.push(Arc::new(TracedReader::new(
        CrontabFileReader::system(layout.etc_dir.join("crontab")).with_timeout(layout.file_timeout),
    )));
    readers.push(Arc::new(TracedReader::new(
        CronDirReader::new(layout.etc_dir.join("cron.d")).with_timeout(layout.file_timeout),
    )));
    readers.push(Arc::new(TracedReader::new(
        RunPartsReader::new(&layout.etc_dir).with_timeout(layout.file_timeout),
    )));

    readers
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
