// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered settings: command-line flag > environment > config file > default

use cf_adapters::LocalLayout;
use cf_core::AggregationConfig;
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub aggregation: AggregationSection,
    pub local: LocalSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AggregationSection {
    pub include_root_crontab: Option<bool>,
    pub include_run_parts: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalSection {
    pub etc_dir: Option<PathBuf>,
    pub crontab_bin: Option<String>,
    pub sudo_bin: Option<String>,
    pub user_crontab: Option<bool>,
}

impl FileConfig {
    /// Load `path`; a missing file means an empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Source selection flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceFlags {
    /// Include root's crontab (runs `sudo -n crontab -l -u root`)
    #[arg(long)]
    pub include_root: bool,

    /// Report `run-parts` lines instead of the scripts they run
    #[arg(long)]
    pub include_run_parts: bool,

    /// Root of the cron layout [default: /etc]
    #[arg(long, value_name = "DIR")]
    pub etc_dir: Option<PathBuf>,

    /// Skip the invoking user's crontab
    #[arg(long)]
    pub no_user_crontab: bool,
}

/// Values taken from `CRONFLEET_*` variables.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub include_root_crontab: Option<bool>,
    pub include_run_parts: Option<bool>,
    pub etc_dir: Option<PathBuf>,
    pub crontab_bin: Option<String>,
    pub sudo_bin: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            include_root_crontab: crate::env::include_root_crontab(),
            include_run_parts: crate::env::include_run_parts(),
            etc_dir: crate::env::etc_dir(),
            crontab_bin: crate::env::crontab_bin(),
            sudo_bin: crate::env::sudo_bin(),
        }
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub aggregation: AggregationConfig,
    pub layout: LocalLayout,
}

impl Settings {
    pub fn resolve(
        flags: &SourceFlags,
        env: EnvOverrides,
        file: FileConfig,
        defaults: LocalLayout,
    ) -> Self {
        let include_root = flags.include_root
            || env
                .include_root_crontab
                .or(file.aggregation.include_root_crontab)
                .unwrap_or(false);
        let include_run_parts = flags.include_run_parts
            || env
                .include_run_parts
                .or(file.aggregation.include_run_parts)
                .unwrap_or(false);

        // No sudo at all when the caller is already root
        let sudo_bin = defaults
            .sudo_bin
            .as_ref()
            .map(|default| env.sudo_bin.or(file.local.sudo_bin).unwrap_or_else(|| default.clone()));

        let user_crontab = defaults.user_crontab
            && !flags.no_user_crontab
            && file.local.user_crontab != Some(false);

        Self {
            aggregation: AggregationConfig::default()
                .with_root_crontab(include_root)
                .with_run_parts_aggregators(include_run_parts),
            layout: LocalLayout {
                etc_dir: flags
                    .etc_dir
                    .clone()
                    .or(env.etc_dir)
                    .or(file.local.etc_dir)
                    .unwrap_or(defaults.etc_dir),
                crontab_bin: env
                    .crontab_bin
                    .or(file.local.crontab_bin)
                    .unwrap_or(defaults.crontab_bin),
                sudo_bin,
                user: defaults.user,
                user_crontab,
                file_timeout: defaults.file_timeout,
                crontab_timeout: defaults.crontab_timeout,
            },
        }
    }

    /// Resolve against the process environment and the config file.
    pub fn load(flags: &SourceFlags) -> Result<Self, ConfigError> {
        let file = match crate::env::config_path() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                FileConfig::load(&path)?
            }
            None => FileConfig::default(),
        };
        Ok(Self::resolve(
            flags,
            EnvOverrides::from_env(),
            file,
            LocalLayout::default(),
        ))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
