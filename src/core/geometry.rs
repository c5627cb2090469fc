//! Affine time <-> pixel mapping.

use crate::core::types::{DataExtent, ViewWindow};

pub const MINUTE_MS: f64 = 60.0 * 1_000.0;
pub const HOUR_MS: f64 = 60.0 * MINUTE_MS;
pub const DAY_MS: f64 = 24.0 * HOUR_MS;
pub const WEEK_MS: f64 = 7.0 * DAY_MS;
/// Month length used for spacing estimates only. Calendar stepping never uses it.
pub const MONTH_APPROX_MS: f64 = 30.0 * DAY_MS;

const MIN_TIME_SPAN: f64 = 1.0;
const MIN_PIXEL_SPAN: f64 = 1e-6;

/// `min(max(value, low), high)`.
///
/// Unlike `f64::clamp` this never panics when `low > high`; `high` wins.
#[must_use]
pub fn clamp(value: f64, low: f64, high: f64) -> f64 {
    value.max(low).min(high)
}

/// Maps `time` in `[t0, t1]` to `[x0, x1]`.
///
/// A time span shorter than one millisecond is treated as one millisecond.
#[must_use]
pub fn time_to_pixel(time: f64, t0: f64, t1: f64, x0: f64, x1: f64) -> f64 {
    let span_t = (t1 - t0).max(MIN_TIME_SPAN);
    let span_x = x1 - x0;
    x0 + ((time - t0) / span_t) * span_x
}

/// Inverse of [`time_to_pixel`]. A zero-width pixel range is floored at `1e-6`.
#[must_use]
pub fn pixel_to_time(x: f64, t0: f64, t1: f64, x0: f64, x1: f64) -> f64 {
    let span_x = (x1 - x0).max(MIN_PIXEL_SPAN);
    let span_t = t1 - t0;
    t0 + ((x - x0) / span_x) * span_t
}

/// Mapper bound to one time window and one horizontal pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMapper {
    t0: f64,
    t1: f64,
    x0: f64,
    x1: f64,
}

impl TimeMapper {
    #[must_use]
    pub const fn new(t0: f64, t1: f64, x0: f64, x1: f64) -> Self {
        Self { t0, t1, x0, x1 }
    }

    /// Maps the view window onto `[x0, x1]`.
    #[must_use]
    pub fn for_view(view: ViewWindow, x0: f64, x1: f64) -> Self {
        Self::new(view.start(), view.end(), x0, x1)
    }

    /// Maps the whole extent onto `[0, width]`, as the minimap does.
    #[must_use]
    pub fn for_extent(extent: DataExtent, width: f64) -> Self {
        Self::new(extent.start(), extent.end(), 0.0, width)
    }

    #[must_use]
    pub fn time_to_pixel(self, time: f64) -> f64 {
        time_to_pixel(time, self.t0, self.t1, self.x0, self.x1)
    }

    #[must_use]
    pub fn pixel_to_time(self, x: f64) -> f64 {
        pixel_to_time(x, self.t0, self.t1, self.x0, self.x1)
    }

    #[must_use]
    pub fn pixel_range(self) -> (f64, f64) {
        (self.x0, self.x1)
    }

    #[must_use]
    pub fn time_range(self) -> (f64, f64) {
        (self.t0, self.t1)
    }

    /// Pixels covered by one millisecond of the mapped window.
    #[must_use]
    pub fn px_per_ms(self) -> f64 {
        (self.x1 - self.x0) / (self.t1 - self.t0).max(MIN_TIME_SPAN)
    }
}
