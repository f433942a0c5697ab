// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Local, Utc};
use cf_core::Diagnostic;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render a next-run instant in local time, or `-` when there is none.
pub fn format_next_run(next_run: Option<DateTime<Utc>>) -> String {
    match next_run {
        Some(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// One `warning:` line per diagnostic.
pub fn format_diagnostics(diagnostics: &[Diagnostic], colorize: bool) -> Vec<String> {
    let label = if colorize {
        color::apply_warning("warning:")
    } else {
        "warning:".to_string()
    };
    diagnostics.iter().map(|d| format!("{label} {d}")).collect()
}

/// Diagnostics always go to stderr so stdout stays parseable.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) -> std::io::Result<()> {
    let mut err = std::io::stderr().lock();
    for line in format_diagnostics(diagnostics, color::should_colorize_stderr()) {
        writeln!(err, "{line}")?;
    }
    Ok(())
}

/// Pretty-printed JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
