//! Adaptive two-band time axis.
//!
//! The tick unit is chosen from the pixel density of the view, the two label
//! bands are derived from it, and labels are placed left to right so that
//! none overlap.

mod formats;
mod grid;
mod label_layout;
mod tick_spec;

pub use formats::AxisLabelFormats;
pub use grid::{GridLine, collect_grid_lines, collect_subtick_xs};
pub use label_layout::{
    AxisLabel, BandLabels, LABEL_MIN_GAP_PX, LabelAnchor, STICKY_INSET_PX, place_band_labels,
};
pub use tick_spec::{
    AxisModes, BottomBandUnit, TICK_TARGET_PX, Tick, TickSet, TickSpec, TopBandMode,
    WEEK_CONDENSED_MIN_PX, choose_tick_spec, generate_subticks, generate_ticks,
    resolve_axis_modes, target_spacing_px,
};

use serde::{Deserialize, Serialize};

use crate::core::calendar::{Calendar, CalendarUnit};
use crate::core::geometry::TimeMapper;
use crate::core::types::ViewWindow;
use crate::error::{TimelineError, TimelineResult};

const LABEL_BOUNDARY_CAP: usize = 2_048;

/// Calendar boundaries from `first` through `end`, inclusive.
///
/// Stops after `cap` entries or as soon as a step fails to advance.
pub(crate) fn walk_boundaries(
    calendar: Calendar,
    first: f64,
    end: f64,
    unit: CalendarUnit,
    step: u32,
    cap: usize,
) -> Vec<f64> {
    let step = i32::try_from(step.max(1)).unwrap_or(i32::MAX);
    let mut out = Vec::new();
    let mut time = first;
    while time <= end && out.len() < cap {
        out.push(time);
        let next = calendar.add_step(time, unit, step);
        if !(next > time) {
            break;
        }
        time = next;
    }
    out
}

/// Vertical geometry of the axis bands above the first row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBandMetrics {
    pub top_height: f64,
    pub bottom_height: f64,
    /// Space under each band.
    pub gap: f64,
}

impl Default for AxisBandMetrics {
    fn default() -> Self {
        Self {
            top_height: 14.0,
            bottom_height: 14.0,
            gap: 2.0,
        }
    }
}

impl AxisBandMetrics {
    pub fn validate(self) -> TimelineResult<Self> {
        for value in [self.top_height, self.bottom_height, self.gap] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidData(
                    "axis band sizes must be finite and >= 0".to_owned(),
                ));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn total_height(self) -> f64 {
        self.top_height + self.gap + self.bottom_height + self.gap
    }

    /// Text baseline of the top band.
    #[must_use]
    pub fn top_baseline(self) -> f64 {
        self.top_height - 3.0
    }

    #[must_use]
    pub fn bottom_baseline(self) -> f64 {
        self.top_height + self.gap + self.bottom_height - 2.0
    }
}

/// Everything the axis contributes to one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisBands {
    pub modes: AxisModes,
    pub top: BandLabels,
    pub bottom: BandLabels,
    pub grid: Vec<GridLine>,
    pub subticks: Vec<f64>,
}

fn band_labels<M>(
    calendar: Calendar,
    mapper: TimeMapper,
    unit: CalendarUnit,
    anchor: LabelAnchor,
    pattern: &str,
    measure: &mut M,
) -> BandLabels
where
    M: FnMut(&str) -> f64,
{
    let (view_start, view_end) = mapper.time_range();
    let first = calendar.start_of(unit, view_start);
    let second = calendar.add_step(first, unit, 1);
    let rest = if second > first {
        walk_boundaries(calendar, second, view_end, unit, 1, LABEL_BOUNDARY_CAP)
    } else {
        Vec::new()
    };
    place_band_labels(first, second, &rest, mapper, anchor, |time| {
        let text = calendar.format(time, pattern);
        let width = measure(&text);
        (text, width)
    })
}

/// Resolves modes, places both label bands and collects grid lines for a view
/// drawn between `inner_left` and `inner_right`.
///
/// `measure` returns the pixel width of a label's text.
pub fn build_axis_bands<M>(
    calendar: Calendar,
    view: ViewWindow,
    inner_left: f64,
    inner_right: f64,
    formats: &AxisLabelFormats,
    mut measure: M,
) -> AxisBands
where
    M: FnMut(&str) -> f64,
{
    let mapper = TimeMapper::for_view(view, inner_left, inner_right);
    let modes = resolve_axis_modes(view.start(), view.end(), inner_right - inner_left);

    let top = band_labels(
        calendar,
        mapper,
        modes.top.calendar_unit(),
        LabelAnchor::Start,
        formats.top_pattern(modes.top),
        &mut measure,
    );
    let bottom = band_labels(
        calendar,
        mapper,
        modes.bottom.calendar_unit(),
        LabelAnchor::Center,
        formats.bottom_pattern(modes.bottom),
        &mut measure,
    );

    AxisBands {
        modes,
        top,
        bottom,
        grid: collect_grid_lines(calendar, mapper, modes.bottom),
        subticks: collect_subtick_xs(calendar, mapper, modes.bottom),
    }
}
