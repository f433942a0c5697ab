// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Merge duplicate job candidates reported by more than one source

use cf_core::RawCronEntry;
use cf_crontab::Schedule;
use std::collections::HashMap;

/// A surviving entry and the provenance of the duplicates folded into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntry {
    pub entry: RawCronEntry,
    pub merged_from: Vec<String>,
}

impl MergedEntry {
    pub fn new(entry: RawCronEntry) -> Self {
        Self {
            entry,
            merged_from: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey {
    host: String,
    command: String,
    schedule: String,
    owner: String,
}

impl DedupKey {
    fn of(entry: &RawCronEntry) -> Self {
        Self {
            host: entry.host.clone(),
            command: entry.command_text.split_whitespace().collect::<Vec<_>>().join(" "),
            schedule: effective_schedule(&entry.schedule_text),
            owner: entry.owner_user.clone(),
        }
    }
}

/// Canonical schedule text; unparseable text compares as written.
fn effective_schedule(text: &str) -> String {
    text.parse::<Schedule>()
        .map(|s| s.effective())
        .unwrap_or_else(|_| text.trim().to_string())
}

/// Collapse entries that describe the same job.
///
/// Entries group by host, command (whitespace-collapsed), effective
/// schedule and owner. The most specific source represents the group, the
/// earliest one on a tie, and the group keeps the position of its first
/// member.
pub fn dedup(entries: Vec<RawCronEntry>) -> Vec<MergedEntry> {
    let mut index: HashMap<DedupKey, usize> = HashMap::new();
    let mut groups: Vec<Vec<RawCronEntry>> = Vec::new();

    for entry in entries {
        let key = DedupKey::of(&entry);
        match index.get(&key) {
            Some(&i) => groups[i].push(entry),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![entry]);
            }
        }
    }

    groups.into_iter().map(merge_group).collect()
}

/// `members` is never empty.
fn merge_group(mut members: Vec<RawCronEntry>) -> MergedEntry {
    let mut best = 0;
    for (i, member) in members.iter().enumerate().skip(1) {
        if member.source.specificity() > members[best].source.specificity() {
            best = i;
        }
    }
    let entry = members.remove(best);
    let merged_from: Vec<String> = members.iter().map(RawCronEntry::provenance).collect();
    if !merged_from.is_empty() {
        tracing::debug!(
            kept = %entry.provenance(),
            merged = merged_from.len(),
            "merged duplicate entries"
        );
    }
    MergedEntry { entry, merged_from }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
