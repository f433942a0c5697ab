// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron schedule grammar: five time fields and `@`-named shorthands.
//!
//! A parsed field keeps the expanded set of values it matches plus, for the
//! two day fields, whether its text began with `*`. Vixie cron treats a
//! day as matching when *either* day field matches, unless one of them is
//! starred; the flag is what carries that rule.

use chrono::{DateTime, TimeZone};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from schedule parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("expected 5 schedule fields, found {0}")]
    FieldCount(usize),
    #[error("invalid {field} field '{text}': {reason}")]
    Field {
        field: &'static str,
        text: String,
        reason: String,
    },
    #[error("unknown named schedule '{0}'")]
    UnknownNamed(String),
}

/// One of the five time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const DAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];
// Day-of-week spelling understood by the `cron` crate
const CRON_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Minute => "minute",
            FieldKind::Hour => "hour",
            FieldKind::DayOfMonth => "day-of-month",
            FieldKind::Month => "month",
            FieldKind::DayOfWeek => "day-of-week",
        }
    }

    /// Accepted input bounds. Day-of-week accepts 7 as a second Sunday.
    fn input_bounds(&self) -> (u8, u8) {
        match self {
            FieldKind::Minute => (0, 59),
            FieldKind::Hour => (0, 23),
            FieldKind::DayOfMonth => (1, 31),
            FieldKind::Month => (1, 12),
            FieldKind::DayOfWeek => (0, 7),
        }
    }

    /// Bounds of the normalized value set.
    fn value_bounds(&self) -> (u8, u8) {
        match self {
            FieldKind::DayOfWeek => (0, 6),
            _ => self.input_bounds(),
        }
    }

    /// Whether a leading `*` changes how the field combines with the other
    /// day field.
    fn star_matters(&self) -> bool {
        matches!(self, FieldKind::DayOfMonth | FieldKind::DayOfWeek)
    }

    fn full_mask(&self) -> u64 {
        let (lo, hi) = self.value_bounds();
        (lo..=hi).fold(0, |mask, v| mask | 1 << v)
    }

    fn lookup(&self, token: &str) -> Option<u8> {
        if let Ok(n) = token.parse::<u8>() {
            return Some(n);
        }
        let lower = token.to_ascii_lowercase();
        match self {
            FieldKind::Month => MONTH_NAMES
                .iter()
                .position(|m| *m == lower)
                .map(|i| i as u8 + 1),
            FieldKind::DayOfWeek => DAY_NAMES.iter().position(|d| *d == lower).map(|i| i as u8),
            _ => None,
        }
    }
}

/// A parsed time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    bits: u64,
    star: bool,
}

impl Field {
    pub fn parse(kind: FieldKind, text: &str) -> Result<Self, ScheduleError> {
        let err = |reason: String| ScheduleError::Field {
            field: kind.name(),
            text: text.to_string(),
            reason,
        };
        let (min, max) = kind.input_bounds();
        let value = |token: &str| -> Result<u8, ScheduleError> {
            let v = kind
                .lookup(token)
                .ok_or_else(|| err(format!("'{token}' is not a value")))?;
            if v < min || v > max {
                return Err(err(format!("{v} is outside {min}-{max}")));
            }
            Ok(v)
        };

        let mut bits = 0u64;
        for item in text.split(',') {
            if item.is_empty() {
                return Err(err("empty list item".to_string()));
            }
            let (range, step) = match item.split_once('/') {
                Some((range, step)) => {
                    let step = step
                        .parse::<u8>()
                        .ok()
                        .filter(|s| *s > 0)
                        .ok_or_else(|| err(format!("invalid step '{step}'")))?;
                    (range, Some(step))
                }
                None => (item, None),
            };
            let (lo, hi) = if range == "*" {
                (min, max)
            } else if let Some((a, b)) = range.split_once('-') {
                (value(a)?, value(b)?)
            } else {
                let v = value(range)?;
                // `a/step` runs from `a` to the end of the range
                if step.is_some() {
                    (v, max)
                } else {
                    (v, v)
                }
            };
            if lo > hi {
                return Err(err(format!("descending range {lo}-{hi}")));
            }
            for v in (lo..=hi).step_by(usize::from(step.unwrap_or(1))) {
                let v = if kind == FieldKind::DayOfWeek && v == 7 { 0 } else { v };
                bits |= 1 << v;
            }
        }

        Ok(Self {
            bits,
            star: kind.star_matters() && text.starts_with('*'),
        })
    }

    pub fn contains(&self, value: u8) -> bool {
        value < 64 && self.bits & (1 << value) != 0
    }

    pub fn is_star(&self) -> bool {
        self.star
    }

    fn values(&self) -> impl Iterator<Item = u8> + '_ {
        (0..64u8).filter(move |v| self.contains(*v))
    }

    fn render(&self, kind: FieldKind) -> String {
        let (lo, hi) = kind.value_bounds();
        let full = kind.full_mask();
        if self.bits == full && (self.star || !kind.star_matters()) {
            return "*".to_string();
        }
        if self.star {
            // Smallest step whose progression from the start is covered; the
            // remainder is appended as a list so the text still begins with `*`.
            for step in 1..=(hi - lo + 1) {
                let seq = progression(lo, hi, step);
                if seq & !self.bits == 0 {
                    let rest = self.bits & !seq;
                    let head = if step == 1 {
                        "*".to_string()
                    } else {
                        format!("*/{step}")
                    };
                    return if rest == 0 {
                        head
                    } else {
                        format!("{head},{}", compress(rest))
                    };
                }
            }
        }
        if !kind.star_matters() {
            for step in 2..=(hi - lo) {
                if self.bits == progression(lo, hi, step) {
                    return format!("*/{step}");
                }
            }
        }
        compress(self.bits)
    }
}

fn progression(lo: u8, hi: u8, step: u8) -> u64 {
    (lo..=hi)
        .step_by(usize::from(step))
        .fold(0, |mask, v| mask | 1 << v)
}

/// Render a value set as comma-separated values and `a-b` runs.
fn compress(bits: u64) -> String {
    let mut parts = Vec::new();
    let mut v = 0u8;
    while v < 64 {
        if bits & (1 << v) == 0 {
            v += 1;
            continue;
        }
        let start = v;
        while v + 1 < 64 && bits & (1 << (v + 1)) != 0 {
            v += 1;
        }
        if start == v {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{start}-{v}"));
        }
        v += 1;
    }
    parts.join(",")
}

/// `minute hour day-of-month month day-of-week`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FiveField {
    pub minute: Field,
    pub hour: Field,
    pub day_of_month: Field,
    pub month: Field,
    pub day_of_week: Field,
}

impl FiveField {
    pub fn from_fields(fields: &[&str]) -> Result<Self, ScheduleError> {
        let [minute, hour, dom, month, dow] = fields else {
            return Err(ScheduleError::FieldCount(fields.len()));
        };
        Ok(Self {
            minute: Field::parse(FieldKind::Minute, minute)?,
            hour: Field::parse(FieldKind::Hour, hour)?,
            day_of_month: Field::parse(FieldKind::DayOfMonth, dom)?,
            month: Field::parse(FieldKind::Month, month)?,
            day_of_week: Field::parse(FieldKind::DayOfWeek, dow)?,
        })
    }

    /// Canonical text; re-parses to an equal schedule.
    pub fn render(&self) -> String {
        [
            self.minute.render(FieldKind::Minute),
            self.hour.render(FieldKind::Hour),
            self.day_of_month.render(FieldKind::DayOfMonth),
            self.month.render(FieldKind::Month),
            self.day_of_week.render(FieldKind::DayOfWeek),
        ]
        .join(" ")
    }

    /// Next firing strictly after `after`, in `after`'s time zone.
    pub fn next_after<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let list = |field: &Field| {
            field
                .values()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        let days = self
            .day_of_week
            .values()
            .map(|v| CRON_DAY_NAMES[usize::from(v)])
            .collect::<Vec<_>>()
            .join(",");
        let dom = list(&self.day_of_month);
        let expr = |dom: &str, dow: &str| {
            format!(
                "0 {} {} {} {} {} *",
                list(&self.minute),
                list(&self.hour),
                dom,
                list(&self.month),
                dow
            )
        };
        let next = |expr: String| {
            cron::Schedule::from_str(&expr)
                .ok()
                .and_then(|s| s.after(after).next())
        };

        if self.day_of_month.is_star() || self.day_of_week.is_star() {
            next(expr(&dom, &days))
        } else {
            let by_dom = next(expr(&dom, "*"));
            let by_dow = next(expr("*", &days));
            match (by_dom, by_dow) {
                (Some(a), Some(b)) => Some(if b < a { b } else { a }),
                (a, b) => a.or(b),
            }
        }
    }
}

impl FromStr for FiveField {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        Self::from_fields(&fields)
    }
}

impl fmt::Display for FiveField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// `@`-prefixed schedule shorthands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedSchedule {
    Reboot,
    Yearly,
    Annually,
    Monthly,
    Weekly,
    Daily,
    Midnight,
    Hourly,
}

impl NamedSchedule {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamedSchedule::Reboot => "@reboot",
            NamedSchedule::Yearly => "@yearly",
            NamedSchedule::Annually => "@annually",
            NamedSchedule::Monthly => "@monthly",
            NamedSchedule::Weekly => "@weekly",
            NamedSchedule::Daily => "@daily",
            NamedSchedule::Midnight => "@midnight",
            NamedSchedule::Hourly => "@hourly",
        }
    }

    /// The five-field schedule this name stands for; `@reboot` has none.
    pub fn equivalent(&self) -> Option<FiveField> {
        let text = match self {
            NamedSchedule::Reboot => return None,
            NamedSchedule::Yearly | NamedSchedule::Annually => "0 0 1 1 *",
            NamedSchedule::Monthly => "0 0 1 * *",
            NamedSchedule::Weekly => "0 0 * * 0",
            NamedSchedule::Daily | NamedSchedule::Midnight => "0 0 * * *",
            NamedSchedule::Hourly => "0 * * * *",
        };
        text.parse().ok()
    }
}

impl FromStr for NamedSchedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "@reboot" => Ok(NamedSchedule::Reboot),
            "@yearly" => Ok(NamedSchedule::Yearly),
            "@annually" => Ok(NamedSchedule::Annually),
            "@monthly" => Ok(NamedSchedule::Monthly),
            "@weekly" => Ok(NamedSchedule::Weekly),
            "@daily" => Ok(NamedSchedule::Daily),
            "@midnight" => Ok(NamedSchedule::Midnight),
            "@hourly" => Ok(NamedSchedule::Hourly),
            other => Err(ScheduleError::UnknownNamed(other.to_string())),
        }
    }
}

/// Any schedule a crontab line can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schedule {
    FiveField(FiveField),
    Named(NamedSchedule),
}

impl Schedule {
    /// Resolved schedule text: canonical five-field form, or `@reboot`.
    ///
    /// Schedules that fire at the same instants share the same text.
    pub fn effective(&self) -> String {
        match self {
            Schedule::FiveField(f) => f.render(),
            Schedule::Named(named) => match named.equivalent() {
                Some(f) => f.render(),
                None => named.as_str().to_string(),
            },
        }
    }

    pub fn next_after<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match self {
            Schedule::FiveField(f) => f.next_after(after),
            Schedule::Named(named) => named.equivalent()?.next_after(after),
        }
    }
}

impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('@') {
            s.parse().map(Schedule::Named)
        } else {
            s.parse().map(Schedule::FiveField)
        }
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
