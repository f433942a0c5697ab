// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cf-core: data model shared by the CronFleet crates

pub mod clock;
pub mod config;
pub mod diagnostic;
pub mod entry;
pub mod id;
pub mod job;
pub mod source;

pub use clock::{Clock, SystemClock};
pub use config::AggregationConfig;
pub use diagnostic::{Diagnostic, SourceError};
pub use entry::{RawCronEntry, LOCAL_HOST};
pub use id::{JobId, ShortId};
pub use job::{CronJob, ScheduleKind};
pub use source::CronSource;

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
#[cfg(any(test, feature = "test-support"))]
pub use entry::test_support;
