// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source text to raw job candidates.
//!
//! Crontab-format sources are parsed line by line. A run-parts source
//! arrives one script at a time; its path is the whole job.

use crate::run_parts::RunPartsPeriod;
use crate::schedule::{FiveField, NamedSchedule, ScheduleError};
use cf_core::{CronSource, Diagnostic, RawCronEntry};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Owner recorded for scripts found in run-parts directories.
pub const RUN_PARTS_OWNER: &str = "root";

/// Why a crontab line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("missing user field")]
    MissingUser,
    #[error("missing command")]
    MissingCommand,
}

/// The pieces of one crontab job line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrontabLine<'a> {
    pub schedule: String,
    pub user: Option<&'a str>,
    /// Verbatim remainder of the line
    pub command: &'a str,
}

/// Where a piece of source text came from.
#[derive(Debug, Clone, Copy)]
pub struct TextOrigin<'a> {
    pub source: CronSource,
    pub host: &'a str,
    /// Owner of the crontab; system-wide sources take it from each line
    pub owner: &'a str,
    pub path: &'a str,
}

/// Entries and warnings produced from one source text.
#[derive(Debug, Default)]
pub struct Parsed {
    pub entries: Vec<RawCronEntry>,
    pub warnings: Vec<Diagnostic>,
}

#[allow(clippy::expect_used)]
static ENV_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\s*=").expect("constant regex pattern is valid")
});

/// Parse one crontab line.
///
/// Returns `Ok(None)` for blank lines, comments and environment
/// assignments.
pub fn parse_crontab_line(
    line: &str,
    has_user_field: bool,
) -> Result<Option<CrontabLine<'_>>, LineError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || ENV_ASSIGNMENT.is_match(trimmed) {
        return Ok(None);
    }

    let (schedule, rest) = if trimmed.starts_with('@') {
        let (tokens, rest) = split_tokens(trimmed, 1);
        let named: NamedSchedule = tokens[0].parse()?;
        (named.as_str().to_string(), rest)
    } else {
        let (tokens, rest) = split_tokens(trimmed, 5);
        // Validates every field; the text itself is kept as written
        FiveField::from_fields(&tokens)?;
        (tokens.join(" "), rest)
    };

    let (user, command) = if has_user_field {
        let (tokens, rest) = split_tokens(rest, 1);
        match tokens.first() {
            Some(user) => (Some(*user), rest),
            None => return Err(LineError::MissingUser),
        }
    } else {
        (None, rest)
    };

    if command.is_empty() {
        return Err(LineError::MissingCommand);
    }
    Ok(Some(CrontabLine {
        schedule,
        user,
        command,
    }))
}

/// Take up to `n` whitespace-separated tokens; the rest is returned trimmed.
fn split_tokens(text: &str, n: usize) -> (Vec<&str>, &str) {
    let mut tokens = Vec::with_capacity(n);
    let mut rest = text.trim_start();
    while tokens.len() < n && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    (tokens, rest.trim_end())
}

/// Parse the text of one source into job candidates.
///
/// Malformed lines become warnings and are left out; everything else in the
/// same text is still returned.
pub fn parse_source(origin: TextOrigin<'_>, text: &str) -> Parsed {
    let parsed = if origin.source.is_crontab_format() {
        parse_crontab(origin, text)
    } else {
        parse_run_parts_script(origin)
    };
    tracing::debug!(
        source = %origin.source,
        path = origin.path,
        entries = parsed.entries.len(),
        warnings = parsed.warnings.len(),
        "parsed source text"
    );
    parsed
}

fn parse_crontab(origin: TextOrigin<'_>, text: &str) -> Parsed {
    let mut parsed = Parsed::default();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        match parse_crontab_line(line, origin.source.has_user_field()) {
            Ok(None) => {}
            Ok(Some(job)) => parsed.entries.push(RawCronEntry {
                source: origin.source,
                host: origin.host.to_string(),
                owner_user: job.user.unwrap_or(origin.owner).to_string(),
                schedule_text: job.schedule,
                command_text: job.command.to_string(),
                origin_path: origin.path.to_string(),
                line: Some(line_no),
            }),
            Err(e) => parsed.warnings.push(Diagnostic::ParseWarning {
                host: origin.host.to_string(),
                source: origin.source,
                origin_path: origin.path.to_string(),
                line: Some(line_no),
                text: line.trim().to_string(),
                reason: e.to_string(),
            }),
        }
    }
    parsed
}

fn parse_run_parts_script(origin: TextOrigin<'_>) -> Parsed {
    let mut parsed = Parsed::default();
    let period = Path::new(origin.path)
        .parent()
        .and_then(Path::to_str)
        .and_then(RunPartsPeriod::from_dir_path);
    let Some(period) = period else {
        parsed.warnings.push(Diagnostic::ParseWarning {
            host: origin.host.to_string(),
            source: origin.source,
            origin_path: origin.path.to_string(),
            line: None,
            text: String::new(),
            reason: "not in a run-parts period directory".to_string(),
        });
        return parsed;
    };

    parsed.entries.push(RawCronEntry {
        source: origin.source,
        host: origin.host.to_string(),
        owner_user: RUN_PARTS_OWNER.to_string(),
        schedule_text: period.named().as_str().to_string(),
        command_text: origin.path.to_string(),
        origin_path: origin.path.to_string(),
        line: None,
    });
    parsed
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
