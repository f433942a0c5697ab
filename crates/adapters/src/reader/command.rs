// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `crontab -l` reader for per-user crontabs

use super::{decode, SourceBatch, SourceDescriptor, SourceReader};
use crate::subprocess::run_with_timeout;
use async_trait::async_trait;
use cf_core::{CronSource, SourceError};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Reads a crontab by running the `crontab` binary.
#[derive(Debug, Clone)]
pub struct CrontabCommandReader {
    descriptor: SourceDescriptor,
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CrontabCommandReader {
    /// The invoking user's crontab: `crontab -l`.
    pub fn user(crontab_bin: impl Into<String>, user: impl Into<String>) -> Self {
        let program = crontab_bin.into();
        let args = vec!["-l".to_string()];
        Self {
            descriptor: SourceDescriptor::local(
                CronSource::UserCrontab,
                command_line(&program, &args),
                user,
            ),
            program,
            args,
            timeout: crate::env::crontab_timeout(),
        }
    }

    /// Root's crontab: `sudo -n crontab -l -u root`, or without `sudo` when
    /// the caller is already root.
    pub fn root(crontab_bin: impl Into<String>, sudo_bin: Option<String>) -> Self {
        let crontab_bin = crontab_bin.into();
        let listing = ["-l", "-u", "root"].map(String::from);
        let (program, args) = match sudo_bin {
            Some(sudo) => {
                let mut args = vec!["-n".to_string(), crontab_bin];
                args.extend(listing);
                (sudo, args)
            }
            None => (crontab_bin, listing.to_vec()),
        };
        Self {
            descriptor: SourceDescriptor::local(
                CronSource::RootCrontab,
                command_line(&program, &args),
                "root",
            ),
            program,
            args,
            timeout: crate::env::crontab_timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl SourceReader for CrontabCommandReader {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn read(&self) -> Result<SourceBatch, SourceError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = run_with_timeout(cmd, self.timeout, &self.descriptor.location).await?;
        if !output.status.success() {
            let stderr = decode(output.stderr);
            let first_line = stderr.lines().map(str::trim).find(|l| !l.is_empty());
            return Err(SourceError::CommandFailed {
                status: output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| c.to_string()),
                stderr: first_line.unwrap_or_default().to_string(),
            });
        }
        Ok(SourceBatch::single(
            &self.descriptor.location,
            decode(output.stdout),
        ))
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
