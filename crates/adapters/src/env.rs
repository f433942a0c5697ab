// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Read budget for a file-backed source (default: 500ms).
pub fn file_timeout() -> Duration {
    parse_duration_ms("CRONFLEET_FILE_TIMEOUT_MS").unwrap_or(Duration::from_millis(500))
}

/// Budget for a `crontab -l` invocation (default: 5000ms).
pub fn crontab_timeout() -> Duration {
    parse_duration_ms("CRONFLEET_CRONTAB_TIMEOUT_MS").unwrap_or(Duration::from_secs(5))
}

/// Login name of the invoking user: USER > LOGNAME.
pub fn current_user() -> Option<String> {
    ["USER", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
