// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inclusion policy: root crontab and run-parts aggregator handling

use cf_adapters::ListedDir;
use cf_core::{AggregationConfig, CronSource, RawCronEntry};
use cf_crontab::run_parts_target;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Run-parts directories the readers of each host enumerated.
///
/// A crontab line may name a directory by the path it was read from or by
/// its path on the host; both resolve to the former.
#[derive(Debug, Clone, Default)]
pub struct ListedDirs {
    names: HashMap<(String, String), String>,
}

impl ListedDirs {
    pub fn insert(&mut self, host: &str, dir: &ListedDir) {
        let path = trim_dir(&dir.path).to_string();
        for name in [&dir.path, &dir.host_path] {
            self.names
                .insert((host.to_string(), trim_dir(name).to_string()), path.clone());
        }
    }

    /// Path a directory named `dir` on `host` was read from, if it was.
    fn resolve(&self, host: &str, dir: &str) -> Option<&str> {
        self.names
            .get(&(host.to_string(), trim_dir(dir).to_string()))
            .map(String::as_str)
    }
}

fn trim_dir(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => path,
        trimmed => trimmed,
    }
}

/// Listed directory an entry hands to `run-parts`, if the entry is an
/// aggregator (a system-wide crontab line driving a listed directory).
fn aggregated_dir<'a>(entry: &RawCronEntry, listed: &'a ListedDirs) -> Option<&'a str> {
    match entry.source {
        CronSource::SystemCrontab | CronSource::CronD => {
            listed.resolve(&entry.host, &run_parts_target(&entry.command_text)?)
        }
        _ => None,
    }
}

/// Drop entries the configuration excludes. Order is preserved.
///
/// A `run-parts` line only counts as an aggregator when it drives a
/// directory whose scripts were listed for the same host. With aggregators
/// disabled those lines are dropped and the scripts stay. With aggregators
/// enabled the lines stay and the scripts they cover are dropped, so a
/// script is never reported twice nor lost.
pub fn apply_policy(
    entries: Vec<RawCronEntry>,
    config: &AggregationConfig,
    listed: &ListedDirs,
) -> Vec<RawCronEntry> {
    let entries: Vec<_> = entries
        .into_iter()
        .filter(|e| config.include_root_crontab || e.source != CronSource::RootCrontab)
        .collect();

    if !config.include_run_parts_aggregators {
        return entries
            .into_iter()
            .filter(|e| {
                let aggregator = aggregated_dir(e, listed).is_some();
                if aggregator {
                    tracing::debug!(path = %e.provenance(), "dropping run-parts aggregator");
                }
                !aggregator
            })
            .collect();
    }

    let covered: HashSet<(String, String)> = entries
        .iter()
        .filter_map(|e| aggregated_dir(e, listed).map(|dir| (e.host.clone(), dir.to_string())))
        .collect();

    entries
        .into_iter()
        .filter(|e| {
            if e.source != CronSource::RunParts {
                return true;
            }
            match Path::new(&e.origin_path).parent().and_then(Path::to_str) {
                Some(dir) => !covered.contains(&(e.host.clone(), trim_dir(dir).to_string())),
                None => true,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
