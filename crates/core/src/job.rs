// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized cron job records

use crate::{CronSource, JobId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a job's schedule was expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleKind {
    /// `m h dom mon dow`
    FiveField,
    /// `@hourly`, `@reboot`, ... or anything that could not be classified
    Named,
    /// Implied by the run-parts directory a script lives in
    RunPartsImplicit,
}

impl ScheduleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleKind::FiveField => "FIVE_FIELD",
            ScheduleKind::Named => "NAMED",
            ScheduleKind::RunPartsImplicit => "RUN_PARTS_IMPLICIT",
        }
    }
}

/// A scheduled job as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronJob {
    pub id: JobId,
    pub host: String,
    pub source: CronSource,
    pub owner_user: String,
    pub schedule_raw: String,
    pub schedule_kind: ScheduleKind,
    pub command: String,
    pub origin_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Absent for `@reboot` and unparseable schedules
    pub next_run: Option<DateTime<Utc>>,
    /// Provenance of other entries collapsed into this job
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged_from: Vec<String>,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
