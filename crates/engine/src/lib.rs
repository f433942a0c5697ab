// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! CronFleet aggregation engine: policy, merge, normalization and the
//! concurrent orchestrator that ties the source readers together

mod aggregate;
pub mod dedup;
mod error;
pub mod filter;
pub mod normalize;

pub use aggregate::{Aggregation, Aggregator, HostSources};
pub use dedup::{dedup, MergedEntry};
pub use error::AggregateError;
pub use filter::{apply_policy, ListedDirs};
pub use normalize::{normalize, normalize_at};
