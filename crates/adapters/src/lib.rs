// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for cron sources: files, directories and the `crontab` binary

pub mod env;
pub mod reader;
pub mod subprocess;
pub mod traced;

pub use reader::{
    local_readers, CronDirReader, CrontabCommandReader, CrontabFileReader, ListedDir, LocalLayout,
    RunPartsReader, SkippedPath, SourceBatch, SourceDescriptor, SourceReader, SourceText,
};
pub use traced::TracedReader;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use reader::{FakeSourceReader, ReadCall};
