// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the aggregation engine

use cf_core::Diagnostic;
use thiserror::Error;

/// Hard failures of an aggregation pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// Every source that was invoked failed; nothing was read.
    #[error("all {} cron sources are unavailable", .failures.len())]
    TotalFailure { failures: Vec<Diagnostic> },
    #[error("no cron sources are configured")]
    NoSources,
}
