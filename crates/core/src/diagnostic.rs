// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Non-fatal findings reported alongside an aggregation result

use crate::CronSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a source (or one path inside it) could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceError {
    #[error("not found")]
    Missing,
    #[error("permission denied")]
    PermissionDenied,
    #[error("command unavailable: {message}")]
    CommandUnavailable { message: String },
    #[error("command exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },
    #[error("timed out after {after_ms}ms")]
    TimedOut { after_ms: u64 },
    #[error("{message}")]
    Io { message: String },
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => SourceError::Missing,
            std::io::ErrorKind::PermissionDenied => SourceError::PermissionDenied,
            _ => SourceError::Io {
                message: err.to_string(),
            },
        }
    }
}

/// A recovered problem: the aggregation continued without the affected
/// line or source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    ParseWarning {
        host: String,
        source: CronSource,
        origin_path: String,
        /// Absent when the warning concerns the whole origin
        line: Option<usize>,
        text: String,
        reason: String,
    },
    SourceUnavailable {
        host: String,
        source: CronSource,
        origin_path: String,
        reason: SourceError,
    },
}

impl Diagnostic {
    pub fn source(&self) -> CronSource {
        match self {
            Diagnostic::ParseWarning { source, .. } | Diagnostic::SourceUnavailable { source, .. } => {
                *source
            }
        }
    }

    pub fn is_parse_warning(&self) -> bool {
        matches!(self, Diagnostic::ParseWarning { .. })
    }

    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Diagnostic::SourceUnavailable { .. })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::ParseWarning {
                host,
                source,
                origin_path,
                line,
                reason,
                ..
            } => match line {
                Some(line) => write!(f, "{host}: {source} {origin_path}:{line}: {reason}"),
                None => write!(f, "{host}: {source} {origin_path}: {reason}"),
            },
            Diagnostic::SourceUnavailable {
                host,
                source,
                origin_path,
                reason,
            } => write!(f, "{host}: {source} {origin_path}: unavailable ({reason})"),
        }
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
