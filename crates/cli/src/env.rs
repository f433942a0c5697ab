// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

/// Interpret a boolean switch: `1`/`true`/`yes`/`on` enable, any other
/// non-empty value disables, unset or empty defers to the next layer.
fn parse_switch(var: &str) -> Option<bool> {
    let value = std::env::var(var).ok()?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    ))
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

// --- Aggregation switches ---

pub fn include_root_crontab() -> Option<bool> {
    parse_switch("CRONFLEET_INCLUDE_ROOT_CRONTAB")
}

pub fn include_run_parts() -> Option<bool> {
    parse_switch("CRONFLEET_INCLUDE_RUN_PARTS")
}

// --- Local layout ---

pub fn etc_dir() -> Option<PathBuf> {
    non_empty("CRONFLEET_ETC_DIR").map(PathBuf::from)
}

pub fn crontab_bin() -> Option<String> {
    non_empty("CRONFLEET_CRONTAB_BIN")
}

pub fn sudo_bin() -> Option<String> {
    non_empty("CRONFLEET_SUDO_BIN")
}

// --- Config file ---

/// Resolve config file: CRONFLEET_CONFIG > XDG_CONFIG_HOME/cronfleet > ~/.config/cronfleet
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = non_empty("CRONFLEET_CONFIG") {
        return Some(PathBuf::from(path));
    }
    if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("cronfleet/config.toml"));
    }
    dirs::home_dir().map(|home| home.join(".config/cronfleet/config.toml"))
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
