//! Loaded-extent presets ("last 7 days ending today", "6 hours from 09:00").

use serde::{Deserialize, Serialize};

use crate::core::calendar::Calendar;
use crate::core::geometry::DAY_MS;
use crate::core::types::DataExtent;
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodAnchor {
    /// The period begins at the reference instant.
    Start,
    /// The period ends at the reference instant.
    #[default]
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodPreset {
    pub duration_ms: f64,
    pub anchor: PeriodAnchor,
}

impl PeriodPreset {
    #[must_use]
    pub const fn new(duration_ms: f64, anchor: PeriodAnchor) -> Self {
        Self {
            duration_ms,
            anchor,
        }
    }
}

/// Resolves a preset at `at_ms` into a loaded extent.
///
/// Sub-day durations anchor exactly on `at_ms`. Day-or-longer durations snap
/// to local day boundaries: a start-anchored period begins at the start of
/// that day, an end-anchored one ends at the start of the following day.
/// The result is intersected with `availability`; an empty intersection
/// falls back to the raw period.
pub fn resolve_period_extent(
    at_ms: f64,
    preset: PeriodPreset,
    calendar: Calendar,
    availability: Option<DataExtent>,
) -> TimelineResult<DataExtent> {
    if !preset.duration_ms.is_finite() || preset.duration_ms <= 0.0 {
        return Err(TimelineError::InvalidData(
            "period duration must be finite and > 0".to_owned(),
        ));
    }
    if !at_ms.is_finite() {
        return Err(TimelineError::InvalidData(
            "period reference time must be finite".to_owned(),
        ));
    }

    let duration = preset.duration_ms;
    let sub_day = duration < DAY_MS;
    let (start, end) = match (preset.anchor, sub_day) {
        (PeriodAnchor::Start, true) => (at_ms, at_ms + duration),
        (PeriodAnchor::End, true) => (at_ms - duration, at_ms),
        (PeriodAnchor::Start, false) => {
            let start = calendar.start_of_day(at_ms);
            (start, start + duration)
        }
        (PeriodAnchor::End, false) => {
            let end = calendar.next_day_start(at_ms);
            (end - duration, end)
        }
    };

    if let Some(available) = availability {
        let clipped_start = start.max(available.start());
        let clipped_end = end.min(available.end());
        if let Ok(extent) = DataExtent::new(clipped_start, clipped_end) {
            return Ok(extent);
        }
    }
    DataExtent::new(start, end)
}
