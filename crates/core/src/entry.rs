// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw job candidates, before policy, merge and normalization

use crate::CronSource;
use serde::{Deserialize, Serialize};

/// Host name used for everything read from the local machine.
pub const LOCAL_HOST: &str = "localhost";

/// One job candidate as found in a source.
///
/// Lives for a single aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCronEntry {
    pub source: CronSource,
    pub host: String,
    /// Empty for system-wide sources without a user field
    pub owner_user: String,
    /// Raw, source-specific schedule syntax
    pub schedule_text: String,
    pub command_text: String,
    /// File (or command) the entry was read from
    pub origin_path: String,
    /// 1-based line in `origin_path`; absent for run-parts scripts
    pub line: Option<usize>,
}

impl RawCronEntry {
    /// `origin_path:line`, or just the path when there is no line.
    pub fn provenance(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.origin_path, line),
            None => self.origin_path.clone(),
        }
    }
}

/// Builder for entries in tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::*;

    pub fn entry(source: CronSource, schedule: &str, command: &str) -> RawCronEntry {
        RawCronEntry {
            source,
            host: LOCAL_HOST.to_string(),
            owner_user: "root".to_string(),
            schedule_text: schedule.to_string(),
            command_text: command.to_string(),
            origin_path: format!("/fixture/{}", source.as_str().to_lowercase()),
            line: Some(1),
        }
    }

    pub fn entry_at(
        source: CronSource,
        origin_path: &str,
        line: Option<usize>,
        schedule: &str,
        command: &str,
    ) -> RawCronEntry {
        RawCronEntry {
            origin_path: origin_path.to_string(),
            line,
            ..entry(source, schedule, command)
        }
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
