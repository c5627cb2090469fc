use serde::{Deserialize, Serialize};

use crate::core::calendar::Calendar;
use crate::core::geometry::TimeMapper;

use super::tick_spec::{BottomBandUnit, TickSpec, generate_subticks};
use super::walk_boundaries;

const GRID_BOUNDARY_CAP: usize = 4_096;
/// Lines closer than this to either edge of the drawing area are dropped.
const GRID_EDGE_INSET_PX: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub time: f64,
    pub x: f64,
    pub major: bool,
}

fn inside(x: f64, inner_left: f64, inner_right: f64) -> bool {
    x > inner_left + GRID_EDGE_INSET_PX && x < inner_right - GRID_EDGE_INSET_PX
}

/// Vertical guide lines on every bottom-band boundary in view.
///
/// Label thinning never applies here: a boundary whose label was skipped
/// still gets its line.
#[must_use]
pub fn collect_grid_lines(
    calendar: Calendar,
    mapper: TimeMapper,
    bottom: BottomBandUnit,
) -> Vec<GridLine> {
    let unit = bottom.calendar_unit();
    let (view_start, view_end) = mapper.time_range();
    let (inner_left, inner_right) = mapper.pixel_range();
    let first = calendar.start_of(unit, view_start);
    walk_boundaries(calendar, first, view_end, unit, 1, GRID_BOUNDARY_CAP)
        .into_iter()
        .filter_map(|time| {
            let x = mapper.time_to_pixel(time);
            inside(x, inner_left, inner_right).then(|| GridLine {
                time,
                x,
                major: calendar.is_major_tick(time, unit),
            })
        })
        .collect()
}

/// Faint sub-division x positions one level finer than the bottom band.
#[must_use]
pub fn collect_subtick_xs(
    calendar: Calendar,
    mapper: TimeMapper,
    bottom: BottomBandUnit,
) -> Vec<f64> {
    let (view_start, view_end) = mapper.time_range();
    let (inner_left, inner_right) = mapper.pixel_range();
    let spec = TickSpec {
        unit: bottom.calendar_unit(),
        step: 1,
    };
    generate_subticks(calendar, view_start, view_end, spec)
        .into_iter()
        .map(|time| mapper.time_to_pixel(time))
        .filter(|x| inside(*x, inner_left, inner_right))
        .collect()
}
