// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Crontab and run-parts parsing

mod parser;
mod run_parts;
mod schedule;

pub use parser::{
    parse_crontab_line, parse_source, CrontabLine, LineError, Parsed, TextOrigin, RUN_PARTS_OWNER,
};
pub use run_parts::{is_excluded_name, run_parts_target, RunPartsPeriod};
pub use schedule::{Field, FieldKind, FiveField, NamedSchedule, Schedule, ScheduleError};
