// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `run-parts` directory conventions

use crate::NamedSchedule;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// A `cron.<period>` directory whose scripts run on an implied schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPartsPeriod {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

impl RunPartsPeriod {
    pub const ALL: [RunPartsPeriod; 4] = [
        RunPartsPeriod::Hourly,
        RunPartsPeriod::Daily,
        RunPartsPeriod::Weekly,
        RunPartsPeriod::Monthly,
    ];

    pub fn dir_name(&self) -> &'static str {
        match self {
            RunPartsPeriod::Hourly => "cron.hourly",
            RunPartsPeriod::Daily => "cron.daily",
            RunPartsPeriod::Weekly => "cron.weekly",
            RunPartsPeriod::Monthly => "cron.monthly",
        }
    }

    pub fn named(&self) -> NamedSchedule {
        match self {
            RunPartsPeriod::Hourly => NamedSchedule::Hourly,
            RunPartsPeriod::Daily => NamedSchedule::Daily,
            RunPartsPeriod::Weekly => NamedSchedule::Weekly,
            RunPartsPeriod::Monthly => NamedSchedule::Monthly,
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.dir_name() == name)
    }

    /// Period of the directory at `path`, judged by its last component.
    pub fn from_dir_path(path: &str) -> Option<Self> {
        let name = Path::new(path).file_name()?.to_str()?;
        Self::from_dir_name(name)
    }
}

// `run-parts [--opts] <dir>` in command position: at the start of the line
// or after `;`, `&&`, `||`, `|`, `{` or `(`, possibly behind wrappers such as
// `nice -n 19`, and optionally called through a path
#[allow(clippy::expect_used)]
static RUN_PARTS_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:^|[;&|({])\s*",
        r"(?:(?:\S*/)?(?:nice|ionice|nohup|exec|command|time)(?:\s+-\S+(?:\s+\d+)?)*\s+)*",
        r"(?:\S*/)?run-parts(?:\s+-[^\s;&|)}]*)*\s+([^\s;&|)}]+)",
    ))
    .expect("constant regex pattern is valid")
});

/// Directory a shell command hands to `run-parts`, if it does.
pub fn run_parts_target(command: &str) -> Option<String> {
    let caps = RUN_PARTS_CALL.captures(command)?;
    let target = caps.get(1)?.as_str().trim_matches(|c| c == '"' || c == '\'');
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}

const BACKUP_SUFFIXES: [&str; 12] = [
    "~",
    ",v",
    ".dpkg-old",
    ".dpkg-new",
    ".dpkg-dist",
    ".dpkg-tmp",
    ".rpmsave",
    ".rpmorig",
    ".rpmnew",
    ".swp",
    ".bak",
    ".cfsaved",
];

/// Names cron and run-parts skip: dotfiles and package-manager or editor
/// leftovers.
pub fn is_excluded_name(name: &str) -> bool {
    name.is_empty()
        || name.starts_with('.')
        || name.contains(".ucf-")
        || BACKUP_SUFFIXES.iter().any(|s| name.ends_with(s))
}

#[cfg(test)]
#[path = "run_parts_tests.rs"]
mod tests;
