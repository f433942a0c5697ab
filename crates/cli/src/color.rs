// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::IsTerminal;

pub mod codes {
    /// Column headers: steel blue
    pub const HEADER: u8 = 74;
    /// Ids, paths and other secondary text: darker grey
    pub const MUTED: u8 = 240;
}

/// Determine if color output should be enabled on stdout.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    colorize_stream(std::io::stdout())
}

/// Same as [`should_colorize()`], for text written to stderr.
pub fn should_colorize_stderr() -> bool {
    colorize_stream(std::io::stderr())
}

fn colorize_stream(stream: impl IsTerminal) -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    stream.is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

/// Apply header color unconditionally (caller decides whether to use this).
pub(crate) fn apply_header(text: &str) -> String {
    format!("{}{}{}", fg256(codes::HEADER), text, RESET)
}

/// Apply muted color unconditionally (caller decides whether to use this).
pub(crate) fn apply_muted(text: &str) -> String {
    format!("{}{}{}", fg256(codes::MUTED), text, RESET)
}

/// Apply warning yellow (ANSI 33) unconditionally.
pub(crate) fn apply_warning(text: &str) -> String {
    format!("\x1b[33m{text}{RESET}")
}

/// Apply status color unconditionally (caller decides whether to use this).
///
/// Green for sources that will be read, yellow for ones left out. Unknown
/// words are left plain.
pub(crate) fn apply_status(text: &str) -> String {
    let lower = text.trim_start().to_lowercase();
    let first_word = lower
        .split(|c: char| !c.is_alphabetic())
        .next()
        .unwrap_or("");
    let code = match first_word {
        "enabled" => "\x1b[32m",
        "disabled" => "\x1b[33m",
        _ => return text.to_string(),
    };
    format!("{code}{text}{RESET}")
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
