//! Wall-clock calendar stepping.
//!
//! Every boundary is computed by converting to the configured zone's local
//! date/time fields, editing those fields, and converting back. Months, weeks
//! and days therefore follow the local calendar even where their absolute
//! length varies (DST shifts, month lengths).

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Datelike, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeDelta, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};

/// DST gaps are skipped by probing forward in 15 minute steps, up to 4 hours.
const GAP_PROBE_STEP_MINUTES: i64 = 15;
const GAP_PROBE_LIMIT: usize = 16;

/// Time zone whose wall clock drives axis stepping and label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeAxisTimeZone {
    /// Host machine local time.
    #[default]
    Local,
    Utc,
    FixedOffsetMinutes {
        minutes: i16,
    },
}

impl TimeAxisTimeZone {
    fn fixed_offset(self) -> Option<FixedOffset> {
        match self {
            Self::FixedOffsetMinutes { minutes } => FixedOffset::east_opt(i32::from(minutes) * 60),
            Self::Utc => FixedOffset::east_opt(0),
            Self::Local => None,
        }
    }
}

/// Calendar granularity.
///
/// Tick selection only ever picks `Month`, `Week`, `Day` or `Hour`; `Year`
/// drives the coarsest top band and `Minute` the finest sub-ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calendar {
    zone: TimeAxisTimeZone,
}

impl Calendar {
    #[must_use]
    pub const fn new(zone: TimeAxisTimeZone) -> Self {
        Self { zone }
    }

    #[must_use]
    pub const fn utc() -> Self {
        Self::new(TimeAxisTimeZone::Utc)
    }

    #[must_use]
    pub fn zone(self) -> TimeAxisTimeZone {
        self.zone
    }

    /// Local wall-clock fields for an epoch-millisecond timestamp.
    #[must_use]
    pub fn to_local(self, time_ms: f64) -> Option<NaiveDateTime> {
        if !time_ms.is_finite() {
            return None;
        }
        let utc = DateTime::<Utc>::from_timestamp_millis(time_ms.floor() as i64)?;
        match self.zone {
            TimeAxisTimeZone::Local => Some(utc.with_timezone(&Local).naive_local()),
            zone => {
                let offset = zone.fixed_offset()?;
                Some(utc.with_timezone(&offset).naive_local())
            }
        }
    }

    /// Epoch milliseconds for local wall-clock fields.
    ///
    /// Ambiguous local times resolve to the earliest instant. Local times that
    /// fall into a DST gap resolve forward to the first valid instant.
    #[must_use]
    pub fn from_local(self, local: NaiveDateTime) -> Option<f64> {
        match self.zone {
            TimeAxisTimeZone::Local => resolve_local(&Local, local),
            zone => resolve_local(&zone.fixed_offset()?, local),
        }
    }

    #[must_use]
    pub fn start_of(self, unit: CalendarUnit, time_ms: f64) -> f64 {
        self.floor_to_step(time_ms, unit, 1)
    }

    /// First boundary of `unit` strictly after the boundary containing `time_ms`.
    #[must_use]
    pub fn next_start(self, unit: CalendarUnit, time_ms: f64) -> f64 {
        self.add_step(self.start_of(unit, time_ms), unit, 1)
    }

    #[must_use]
    pub fn start_of_year(self, time_ms: f64) -> f64 {
        self.start_of(CalendarUnit::Year, time_ms)
    }

    #[must_use]
    pub fn start_of_month(self, time_ms: f64) -> f64 {
        self.start_of(CalendarUnit::Month, time_ms)
    }

    /// Weeks start on Sunday (weekday index 0).
    #[must_use]
    pub fn start_of_week(self, time_ms: f64) -> f64 {
        self.start_of(CalendarUnit::Week, time_ms)
    }

    #[must_use]
    pub fn start_of_day(self, time_ms: f64) -> f64 {
        self.start_of(CalendarUnit::Day, time_ms)
    }

    #[must_use]
    pub fn start_of_hour(self, time_ms: f64) -> f64 {
        self.start_of(CalendarUnit::Hour, time_ms)
    }

    #[must_use]
    pub fn next_year_start(self, time_ms: f64) -> f64 {
        self.next_start(CalendarUnit::Year, time_ms)
    }

    #[must_use]
    pub fn next_month_start(self, time_ms: f64) -> f64 {
        self.next_start(CalendarUnit::Month, time_ms)
    }

    #[must_use]
    pub fn next_week_start(self, time_ms: f64) -> f64 {
        self.next_start(CalendarUnit::Week, time_ms)
    }

    #[must_use]
    pub fn next_day_start(self, time_ms: f64) -> f64 {
        self.next_start(CalendarUnit::Day, time_ms)
    }

    #[must_use]
    pub fn next_hour_start(self, time_ms: f64) -> f64 {
        self.next_start(CalendarUnit::Hour, time_ms)
    }

    /// Floors to the start of a `step`-aligned boundary of `unit`.
    ///
    /// Month and hour (and minute/year) steps align to multiples of `step`
    /// within their parent field; week and day ignore `step`. Timestamps that
    /// cannot be represented are returned unchanged.
    #[must_use]
    pub fn floor_to_step(self, time_ms: f64, unit: CalendarUnit, step: u32) -> f64 {
        let Some(local) = self.to_local(time_ms) else {
            return time_ms;
        };
        let step = step.max(1);
        let date = local.date();
        let floored = match unit {
            CalendarUnit::Year => {
                let year = date.year();
                let floored_year = year - year.rem_euclid(step as i32);
                NaiveDate::from_ymd_opt(floored_year, 1, 1).map(at_midnight)
            }
            CalendarUnit::Month => {
                let month0 = date.month0() / step * step;
                NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1).map(at_midnight)
            }
            CalendarUnit::Week => {
                let back = i64::from(date.weekday().num_days_from_sunday());
                date.checked_sub_signed(TimeDelta::days(back))
                    .map(at_midnight)
            }
            CalendarUnit::Day => Some(at_midnight(date)),
            CalendarUnit::Hour => date.and_hms_opt(local.hour() / step * step, 0, 0),
            CalendarUnit::Minute => date.and_hms_opt(local.hour(), local.minute() / step * step, 0),
        };
        floored
            .and_then(|naive| self.from_local(naive))
            .unwrap_or(time_ms)
    }

    /// Adds `step` units by editing wall-clock fields.
    ///
    /// Adding months to a day that the target month lacks clamps to the last
    /// day of that month.
    #[must_use]
    pub fn add_step(self, time_ms: f64, unit: CalendarUnit, step: i32) -> f64 {
        let Some(local) = self.to_local(time_ms) else {
            return time_ms;
        };
        let shifted = match unit {
            CalendarUnit::Year => add_months(local, i64::from(step) * 12),
            CalendarUnit::Month => add_months(local, i64::from(step)),
            CalendarUnit::Week => local.checked_add_signed(TimeDelta::days(7 * i64::from(step))),
            CalendarUnit::Day => local.checked_add_signed(TimeDelta::days(i64::from(step))),
            CalendarUnit::Hour => local.checked_add_signed(TimeDelta::hours(i64::from(step))),
            CalendarUnit::Minute => local.checked_add_signed(TimeDelta::minutes(i64::from(step))),
        };
        shifted
            .and_then(|naive| self.from_local(naive))
            .unwrap_or(time_ms)
    }

    /// A tick is major when it also sits on the next-coarser boundary:
    /// January for months, the 1st for weeks and days, midnight for hours,
    /// the top of the hour for minutes. Years are never major.
    #[must_use]
    pub fn is_major_tick(self, time_ms: f64, unit: CalendarUnit) -> bool {
        let Some(local) = self.to_local(time_ms) else {
            return false;
        };
        match unit {
            CalendarUnit::Year => false,
            CalendarUnit::Month => local.month() == 1,
            CalendarUnit::Week | CalendarUnit::Day => local.day() == 1,
            CalendarUnit::Hour => local.hour() == 0,
            CalendarUnit::Minute => local.minute() == 0,
        }
    }

    /// Formats local fields with a strftime pattern.
    ///
    /// Returns an empty string for unrepresentable timestamps or patterns
    /// chrono rejects.
    #[must_use]
    pub fn format(self, time_ms: f64, pattern: &str) -> String {
        let Some(local) = self.to_local(time_ms) else {
            return String::new();
        };
        let mut out = String::new();
        if write!(out, "{}", local.format(pattern)).is_err() {
            return String::new();
        }
        out
    }
}

/// `true` when chrono can parse every item of `pattern`.
#[must_use]
pub fn is_valid_strftime_pattern(pattern: &str) -> bool {
    !pattern.is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn add_months(local: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        local.checked_add_months(magnitude)
    } else {
        local.checked_sub_months(magnitude)
    }
}

fn resolve_local<Tz: TimeZone>(zone: &Tz, local: NaiveDateTime) -> Option<f64> {
    let mut probe = local;
    for _ in 0..GAP_PROBE_LIMIT {
        if let Some(resolved) = zone.from_local_datetime(&probe).earliest() {
            return Some(resolved.timestamp_millis() as f64);
        }
        probe = probe.checked_add_signed(TimeDelta::minutes(GAP_PROBE_STEP_MINUTES))?;
    }
    None
}
