// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed readers: single crontab files, drop-in directories, and
//! the periodic run-parts directories.

use super::{
    decode, ListedDir, SkippedPath, SourceBatch, SourceDescriptor, SourceReader, SourceText,
};
use async_trait::async_trait;
use cf_core::{CronSource, SourceError};
use cf_crontab::{is_excluded_name, RunPartsPeriod, RUN_PARTS_OWNER};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where cron itself finds the etc tree, whatever root it is read from.
const HOST_ETC: &str = "/etc";

/// Reads one crontab-format file (e.g. `/etc/crontab`).
#[derive(Debug, Clone)]
pub struct CrontabFileReader {
    descriptor: SourceDescriptor,
    path: PathBuf,
    timeout: Duration,
}

impl CrontabFileReader {
    pub fn new(source: CronSource, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            descriptor: SourceDescriptor::local(source, path.display().to_string(), ""),
            path,
            timeout: crate::env::file_timeout(),
        }
    }

    /// The system crontab, whose lines carry a user field.
    pub fn system(path: impl Into<PathBuf>) -> Self {
        Self::new(CronSource::SystemCrontab, path)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SourceReader for CrontabFileReader {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn read(&self) -> Result<SourceBatch, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(SourceBatch::single(&self.descriptor.location, decode(bytes)))
    }
}

/// Reads every regular file in a drop-in directory such as `/etc/cron.d`.
///
/// Files are visited in name order. Editor backups, package-manager
/// leftovers and dotfiles are ignored, matching what cron itself loads.
#[derive(Debug, Clone)]
pub struct CronDirReader {
    descriptor: SourceDescriptor,
    dir: PathBuf,
    timeout: Duration,
}

impl CronDirReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            descriptor: SourceDescriptor::local(CronSource::CronD, dir.display().to_string(), ""),
            dir,
            timeout: crate::env::file_timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SourceReader for CronDirReader {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn read(&self) -> Result<SourceBatch, SourceError> {
        let mut batch = SourceBatch::default();
        for path in list_candidates(&self.dir).await? {
            let origin = path.display().to_string();
            match read_regular_file(&path).await {
                Ok(Some(bytes)) => batch.texts.push(SourceText::new(origin, decode(bytes))),
                Ok(None) => tracing::debug!(path = %origin, "skipping non-file entry"),
                Err(e) => batch.skipped.push(SkippedPath {
                    path: origin,
                    reason: SourceError::from(e),
                }),
            }
        }
        Ok(batch)
    }
}

/// Lists the executable scripts in `cron.hourly`, `cron.daily`,
/// `cron.weekly` and `cron.monthly` under one etc directory.
///
/// Every script yields its own empty `SourceText` at the script's path, and
/// every period directory that could be listed is reported in
/// `listed_dirs`. Scripts whose names are not UTF-8 are skipped. The read
/// fails only when no period directory could be listed at all.
#[derive(Debug, Clone)]
pub struct RunPartsReader {
    descriptor: SourceDescriptor,
    etc_dir: PathBuf,
    timeout: Duration,
}

impl RunPartsReader {
    pub fn new(etc_dir: impl Into<PathBuf>) -> Self {
        let etc_dir = etc_dir.into();
        let location = etc_dir.join("cron.{hourly,daily,weekly,monthly}");
        Self {
            descriptor: SourceDescriptor::local(
                CronSource::RunParts,
                location.display().to_string(),
                RUN_PARTS_OWNER,
            ),
            etc_dir,
            timeout: crate::env::file_timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SourceReader for RunPartsReader {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn read(&self) -> Result<SourceBatch, SourceError> {
        let mut batch = SourceBatch::default();
        for period in RunPartsPeriod::ALL {
            let dir = self.etc_dir.join(period.dir_name());
            let origin = dir.display().to_string();
            let candidates = match list_candidates(&dir).await {
                Ok(paths) => paths,
                Err(SourceError::Missing) => {
                    tracing::debug!(dir = %origin, "period directory absent");
                    continue;
                }
                Err(reason) => {
                    batch.skipped.push(SkippedPath {
                        path: origin,
                        reason,
                    });
                    continue;
                }
            };

            for path in candidates {
                match tokio::fs::metadata(&path).await {
                    Ok(meta) if meta.is_file() && meta.permissions().mode() & 0o111 != 0 => {
                        match path.to_str() {
                            Some(script) => batch.texts.push(SourceText::new(script, "")),
                            None => batch.skipped.push(SkippedPath {
                                path: path.display().to_string(),
                                reason: SourceError::Io {
                                    message: "script name is not valid UTF-8".to_string(),
                                },
                            }),
                        }
                    }
                    Ok(_) => {}
                    Err(e) => batch.skipped.push(SkippedPath {
                        path: path.display().to_string(),
                        reason: SourceError::from(e),
                    }),
                }
            }
            let host_path = Path::new(HOST_ETC).join(period.dir_name());
            batch
                .listed_dirs
                .push(ListedDir::new(origin, host_path.display().to_string()));
        }

        if batch.listed_dirs.is_empty() {
            // Nothing listed: surface the first real failure, else report absence
            return Err(batch
                .skipped
                .into_iter()
                .next()
                .map(|s| s.reason)
                .unwrap_or(SourceError::Missing));
        }
        Ok(batch)
    }
}

/// Contents of `path`, or `None` when it is not a regular file.
async fn read_regular_file(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    let meta = tokio::fs::metadata(path).await?;
    if !meta.is_file() {
        return Ok(None);
    }
    tokio::fs::read(path).await.map(Some)
}

/// Sorted, non-excluded entries of a directory.
async fn list_candidates(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if is_excluded_name(&name) {
            tracing::trace!(dir = %dir.display(), name = %name, "ignoring excluded name");
            continue;
        }
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
