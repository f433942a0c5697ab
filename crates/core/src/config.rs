// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-call aggregation settings

use serde::{Deserialize, Serialize};

/// Policy switches for one aggregation call.
///
/// Passed by value into the pipeline; nothing downstream reads process
/// state to decide policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Surface root's personal crontab (privileged, off by default)
    pub include_root_crontab: bool,
    /// Surface `run-parts` aggregator lines instead of the scripts they run
    pub include_run_parts_aggregators: bool,
}

impl AggregationConfig {
    pub fn with_root_crontab(mut self, on: bool) -> Self {
        self.include_root_crontab = on;
        self
    }

    pub fn with_run_parts_aggregators(mut self, on: bool) -> Self {
        self.include_run_parts_aggregators = on;
        self
    }
}
