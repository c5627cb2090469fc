use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Size of one drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if !self.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Unvalidated `{start, end}` pair in epoch milliseconds.
///
/// This is the wire shape exchanged with the host (proposed views, view-changed
/// payloads, gap intervals). It carries no invariants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn overlaps(self, start: f64, end: f64) -> bool {
        !(self.end < start || self.start > end)
    }
}

/// Full loaded time range. Always `end > start`, both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TimeRange", into = "TimeRange")]
pub struct DataExtent {
    start: f64,
    end: f64,
}

impl DataExtent {
    pub fn new(start: f64, end: f64) -> TimelineResult<Self> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(TimelineError::InvalidExtent { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn as_range(self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

impl TryFrom<TimeRange> for DataExtent {
    type Error = TimelineError;

    fn try_from(range: TimeRange) -> TimelineResult<Self> {
        Self::new(range.start, range.end)
    }
}

impl From<DataExtent> for TimeRange {
    fn from(extent: DataExtent) -> Self {
        extent.as_range()
    }
}

/// Currently visible window.
///
/// Only produced by [`crate::core::clamp_view`], so every instance satisfies
/// the span and bounds invariants for the extent it was clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewWindow {
    start: f64,
    end: f64,
}

impl ViewWindow {
    pub(crate) const fn from_clamped(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn as_range(self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

impl From<ViewWindow> for TimeRange {
    fn from(view: ViewWindow) -> Self {
        view.as_range()
    }
}
