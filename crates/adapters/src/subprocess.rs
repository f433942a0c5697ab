// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use cf_core::SourceError;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Run a subprocess command with a timeout.
///
/// Wraps `Command::output()` with `tokio::time::timeout`. The child is
/// spawned with `kill_on_drop`, so it is killed when the timeout elapses or
/// when the caller abandons the future.
///
/// A non-zero exit is not an error here; callers inspect `Output::status`.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, SourceError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(SourceError::CommandUnavailable {
            message: format!("{description}: {io_err}"),
        }),
        Err(_elapsed) => {
            tracing::info!(description, timeout_ms = timeout.as_millis() as u64, "command timed out");
            Err(SourceError::TimedOut {
                after_ms: timeout.as_millis() as u64,
            })
        }
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
