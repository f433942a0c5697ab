// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turn merged entries into `CronJob` records

use crate::dedup::MergedEntry;
use cf_core::{CronJob, CronSource, JobId, ScheduleKind};
use cf_crontab::Schedule;
use chrono::{DateTime, Local, TimeZone, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Length of the hex prefix kept for a job id.
const ID_LEN: usize = 16;

/// Normalize entries, computing next runs in the local time zone.
pub fn normalize(merged: Vec<MergedEntry>, now: DateTime<Utc>) -> Vec<CronJob> {
    normalize_at(merged, &now.with_timezone(&Local))
}

/// Normalize entries, computing next runs in `now`'s time zone.
pub fn normalize_at<Tz: TimeZone>(merged: Vec<MergedEntry>, now: &DateTime<Tz>) -> Vec<CronJob> {
    let mut issued: HashSet<String> = HashSet::new();
    merged
        .into_iter()
        .map(|MergedEntry { entry, merged_from }| {
            let parsed = entry.schedule_text.parse::<Schedule>().ok();
            let schedule_kind = match (entry.source, &parsed) {
                (CronSource::RunParts, _) => ScheduleKind::RunPartsImplicit,
                (_, Some(Schedule::FiveField(_))) => ScheduleKind::FiveField,
                _ => ScheduleKind::Named,
            };
            let next_run = parsed
                .and_then(|s| s.next_after(now))
                .map(|t| t.with_timezone(&Utc));

            let mut id = job_hash(&[
                &entry.host,
                entry.source.as_str(),
                &entry.origin_path,
                &entry.command_text,
            ]);
            if issued.contains(&id) {
                // Same file and command under another schedule or owner
                id = job_hash(&[
                    &entry.host,
                    entry.source.as_str(),
                    &entry.origin_path,
                    &entry.command_text,
                    &entry.schedule_text,
                    &entry.owner_user,
                ]);
                let mut salt = 1u32;
                while issued.contains(&id) {
                    id = job_hash(&[&id, &salt.to_string()]);
                    salt += 1;
                }
            }
            issued.insert(id.clone());

            CronJob {
                id: JobId::new(id),
                host: entry.host,
                source: entry.source,
                owner_user: entry.owner_user,
                schedule_raw: entry.schedule_text,
                schedule_kind,
                command: entry.command_text,
                origin_path: entry.origin_path,
                line: entry.line,
                next_run,
                merged_from,
            }
        })
        .collect()
}

/// Truncated sha256 over NUL-separated parts.
fn job_hash(parts: &[&str]) -> String {
    let canonical = parts.join("\0");
    let digest = Sha256::digest(canonical.as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(ID_LEN);
    hex
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
