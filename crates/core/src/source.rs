// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provenance tags for cron definitions

use serde::{Deserialize, Serialize};

/// Where a cron definition was read from.
///
/// Assigned by the reader that produced the text and never changed
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CronSource {
    /// `crontab -l` for the invoking user
    UserCrontab,
    /// `crontab -l -u root`, opt-in only
    RootCrontab,
    /// `/etc/crontab`
    SystemCrontab,
    /// `/etc/cron.d/*`
    CronD,
    /// Scripts under `/etc/cron.{hourly,daily,weekly,monthly}`
    RunParts,
    /// Fixture data; never produced by a real reader
    Synthetic,
}

impl CronSource {
    pub const ALL: [CronSource; 6] = [
        CronSource::UserCrontab,
        CronSource::RootCrontab,
        CronSource::SystemCrontab,
        CronSource::CronD,
        CronSource::RunParts,
        CronSource::Synthetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CronSource::UserCrontab => "USER_CRONTAB",
            CronSource::RootCrontab => "ROOT_CRONTAB",
            CronSource::SystemCrontab => "SYSTEM_CRONTAB",
            CronSource::CronD => "CRON_D",
            CronSource::RunParts => "RUN_PARTS",
            CronSource::Synthetic => "SYNTHETIC",
        }
    }

    /// Whether lines carry a user field between schedule and command.
    pub fn has_user_field(&self) -> bool {
        matches!(self, CronSource::SystemCrontab | CronSource::CronD)
    }

    /// Whether the source text uses crontab line syntax.
    ///
    /// Run-parts sources are file listings instead.
    pub fn is_crontab_format(&self) -> bool {
        !matches!(self, CronSource::RunParts)
    }

    /// Rank used when several sources describe the same job.
    ///
    /// An explicit crontab line carries more information than a script
    /// inferred from a run-parts directory.
    pub fn specificity(&self) -> u8 {
        match self {
            CronSource::UserCrontab
            | CronSource::RootCrontab
            | CronSource::SystemCrontab
            | CronSource::CronD => 2,
            CronSource::RunParts => 1,
            CronSource::Synthetic => 0,
        }
    }
}

impl std::fmt::Display for CronSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
