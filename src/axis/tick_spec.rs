use serde::{Deserialize, Serialize};

use crate::core::calendar::{Calendar, CalendarUnit};
use crate::core::geometry::{DAY_MS, HOUR_MS, MONTH_APPROX_MS, WEEK_MS};

use super::walk_boundaries;

/// Spacing target for units without a dedicated target.
pub const TICK_TARGET_PX: f64 = 96.0;
/// Week width from which wide views switch from month labels to condensed weeks.
pub const WEEK_CONDENSED_MIN_PX: f64 = 24.0;

const TICK_BOUNDARY_CAP: usize = 4_096;
const SUBTICK_BOUNDARY_CAP: usize = 8_192;

/// Candidates, coarsest first.
const TICK_CANDIDATES: [(CalendarUnit, f64); 4] = [
    (CalendarUnit::Month, MONTH_APPROX_MS),
    (CalendarUnit::Week, WEEK_MS),
    (CalendarUnit::Day, DAY_MS),
    (CalendarUnit::Hour, HOUR_MS),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSpec {
    pub unit: CalendarUnit,
    pub step: u32,
}

/// Minimum boundary-to-boundary spacing each unit needs to be labeled.
#[must_use]
pub fn target_spacing_px(unit: CalendarUnit) -> f64 {
    match unit {
        CalendarUnit::Month => 120.0,
        CalendarUnit::Week => 110.0,
        CalendarUnit::Day => 70.0,
        CalendarUnit::Hour => 64.0,
        CalendarUnit::Year | CalendarUnit::Minute => TICK_TARGET_PX,
    }
}

fn px_per_ms(view_start: f64, view_end: f64, pixel_width: f64) -> f64 {
    pixel_width / (view_end - view_start).max(1.0)
}

/// Finest unit whose boundary spacing meets its own target, else month.
#[must_use]
pub fn choose_tick_spec(view_start: f64, view_end: f64, pixel_width: f64) -> TickSpec {
    let px_per_ms = px_per_ms(view_start, view_end, pixel_width);
    TICK_CANDIDATES
        .iter()
        .rev()
        .find(|(unit, unit_ms)| unit_ms * px_per_ms >= target_spacing_px(*unit))
        .map_or(
            TickSpec {
                unit: CalendarUnit::Month,
                step: 1,
            },
            |(unit, _)| TickSpec {
                unit: *unit,
                step: 1,
            },
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopBandMode {
    Year,
    Month,
    Day,
}

impl TopBandMode {
    #[must_use]
    pub fn calendar_unit(self) -> CalendarUnit {
        match self {
            Self::Year => CalendarUnit::Year,
            Self::Month => CalendarUnit::Month,
            Self::Day => CalendarUnit::Day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BottomBandUnit {
    Month,
    /// Day-of-month labels anchored on week starts.
    WeekCondensed,
    Day,
    Hour,
}

impl BottomBandUnit {
    #[must_use]
    pub fn calendar_unit(self) -> CalendarUnit {
        match self {
            Self::Month => CalendarUnit::Month,
            Self::WeekCondensed => CalendarUnit::Week,
            Self::Day => CalendarUnit::Day,
            Self::Hour => CalendarUnit::Hour,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisModes {
    pub spec: TickSpec,
    pub top: TopBandMode,
    pub bottom: BottomBandUnit,
}

/// Derives the two-band label scheme from the selected tick unit.
#[must_use]
pub fn resolve_axis_modes(view_start: f64, view_end: f64, pixel_width: f64) -> AxisModes {
    let spec = choose_tick_spec(view_start, view_end, pixel_width);
    let week_px = WEEK_MS * px_per_ms(view_start, view_end, pixel_width);
    let (top, bottom) = match spec.unit {
        CalendarUnit::Hour => (TopBandMode::Day, BottomBandUnit::Hour),
        CalendarUnit::Day => (TopBandMode::Month, BottomBandUnit::Day),
        _ if week_px >= WEEK_CONDENSED_MIN_PX => {
            (TopBandMode::Month, BottomBandUnit::WeekCondensed)
        }
        _ => (TopBandMode::Year, BottomBandUnit::Month),
    };
    AxisModes { spec, top, bottom }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub time: f64,
    pub major: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSet {
    pub spec: TickSpec,
    pub ticks: Vec<Tick>,
}

/// Ticks of the selected spec from the boundary covering `view_start` through `view_end`.
#[must_use]
pub fn generate_ticks(
    calendar: Calendar,
    view_start: f64,
    view_end: f64,
    pixel_width: f64,
) -> TickSet {
    let spec = choose_tick_spec(view_start, view_end, pixel_width);
    let first = calendar.floor_to_step(view_start, spec.unit, spec.step);
    let ticks = walk_boundaries(calendar, first, view_end, spec.unit, spec.step, TICK_BOUNDARY_CAP)
        .into_iter()
        .map(|time| Tick {
            time,
            major: calendar.is_major_tick(time, spec.unit),
        })
        .collect();
    TickSet { spec, ticks }
}

/// Finer unlabeled guide ticks for a labeled spec.
///
/// Month gets weeks, week gets days, day gets 6 hour marks and hour gets
/// 15 minute marks.
#[must_use]
pub fn generate_subticks(
    calendar: Calendar,
    view_start: f64,
    view_end: f64,
    spec: TickSpec,
) -> Vec<f64> {
    let (unit, step) = match spec.unit {
        CalendarUnit::Month => (CalendarUnit::Week, 1),
        CalendarUnit::Week => (CalendarUnit::Day, 1),
        CalendarUnit::Day => (CalendarUnit::Hour, 6),
        CalendarUnit::Hour => (CalendarUnit::Minute, 15),
        CalendarUnit::Year | CalendarUnit::Minute => return Vec::new(),
    };
    let first = calendar.floor_to_step(view_start, unit, step);
    walk_boundaries(calendar, first, view_end, unit, step, SUBTICK_BOUNDARY_CAP)
}

#[cfg(test)]
mod tests {
    use super::{
        BottomBandUnit, TopBandMode, choose_tick_spec, generate_subticks, generate_ticks,
        resolve_axis_modes,
    };
    use crate::core::geometry::{DAY_MS, HOUR_MS};
    use crate::core::{Calendar, CalendarUnit};

    #[test]
    fn narrow_view_selects_hours() {
        let spec = choose_tick_spec(0.0, 6.0 * HOUR_MS, 1_000.0);
        assert_eq!(spec.unit, CalendarUnit::Hour);
        let modes = resolve_axis_modes(0.0, 6.0 * HOUR_MS, 1_000.0);
        assert_eq!(modes.top, TopBandMode::Day);
        assert_eq!(modes.bottom, BottomBandUnit::Hour);
    }

    #[test]
    fn two_week_view_selects_days() {
        let modes = resolve_axis_modes(0.0, 14.0 * DAY_MS, 1_000.0);
        assert_eq!(modes.spec.unit, CalendarUnit::Day);
        assert_eq!(modes.top, TopBandMode::Month);
        assert_eq!(modes.bottom, BottomBandUnit::Day);
    }

    #[test]
    fn wide_views_pick_condensed_weeks_then_months() {
        // 120 days over 1000px: a week is ~58px, too tight for days.
        let modes = resolve_axis_modes(0.0, 120.0 * DAY_MS, 1_000.0);
        assert_eq!(modes.bottom, BottomBandUnit::WeekCondensed);
        assert_eq!(modes.top, TopBandMode::Month);

        // Ten years: a week is ~2px.
        let modes = resolve_axis_modes(0.0, 3_650.0 * DAY_MS, 1_000.0);
        assert_eq!(modes.bottom, BottomBandUnit::Month);
        assert_eq!(modes.top, TopBandMode::Year);
    }

    #[test]
    fn zero_width_falls_back_to_month() {
        assert_eq!(choose_tick_spec(0.0, DAY_MS, 0.0).unit, CalendarUnit::Month);
        assert_eq!(choose_tick_spec(0.0, DAY_MS, f64::NAN).unit, CalendarUnit::Month);
    }

    #[test]
    fn generated_ticks_flag_midnight_as_major() {
        let set = generate_ticks(Calendar::utc(), 20.0 * HOUR_MS, 28.0 * HOUR_MS, 1_000.0);
        assert_eq!(set.spec.unit, CalendarUnit::Hour);
        let majors: Vec<f64> = set.ticks.iter().filter(|t| t.major).map(|t| t.time).collect();
        assert_eq!(majors, vec![DAY_MS]);
        assert_eq!(set.ticks.len(), 9);
    }

    #[test]
    fn hour_subticks_are_quarter_hours() {
        let spec = choose_tick_spec(0.0, HOUR_MS, 1_000.0);
        let subticks = generate_subticks(Calendar::utc(), 0.0, HOUR_MS, spec);
        assert_eq!(subticks.len(), 5);
        assert_eq!(subticks[1], 15.0 * 60_000.0);
    }
}
