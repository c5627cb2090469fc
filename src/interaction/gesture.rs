use serde::{Deserialize, Serialize};

use crate::core::types::{TimeRange, ViewWindow};

use super::brush::{BrushGesture, BrushMode};

/// Baseline-shifted window for a drag of `dx` pixels across `width` pixels.
///
/// Dragging right moves the window back in time. A non-positive width
/// leaves the baseline in place.
#[must_use]
pub fn resolve_drag_pan(baseline: TimeRange, dx: f64, width: f64) -> TimeRange {
    if !dx.is_finite() || !width.is_finite() || width <= 0.0 {
        return baseline;
    }
    let dt = baseline.span() * (dx / width);
    TimeRange::new(baseline.start - dt, baseline.end - dt)
}

/// `exp(-delta * k)` where `delta` is the vertical delta unless it is zero.
///
/// Positive deltas (scroll down) give factors below one and zoom in.
#[must_use]
pub fn wheel_zoom_factor(delta_x: f64, delta_y: f64, sensitivity: f64) -> f64 {
    let delta = if delta_y.abs() > 0.0 { delta_y } else { delta_x };
    (-delta * sensitivity).exp()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanGesture {
    pub pointer_id: u64,
    pub press_x: f64,
    pub baseline: ViewWindow,
    pub width: f64,
}

impl PanGesture {
    #[must_use]
    pub fn target(self, x: f64) -> TimeRange {
        resolve_drag_pan(self.baseline.as_range(), x - self.press_x, self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "mode", rename_all = "lowercase")]
pub enum GestureKind {
    Pan,
    Brush(BrushMode),
}

/// At most one gesture is alive at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum GestureState {
    #[default]
    Idle,
    Panning(PanGesture),
    Brushing(BrushGesture),
}

impl GestureState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn pointer_id(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Panning(pan) => Some(pan.pointer_id),
            Self::Brushing(brush) => Some(brush.pointer_id),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::Idle => None,
            Self::Panning(_) => Some(GestureKind::Pan),
            Self::Brushing(brush) => Some(GestureKind::Brush(brush.mode)),
        }
    }

    /// Ends the gesture if it belongs to `pointer_id`, returning what ended.
    pub fn finish(&mut self, pointer_id: u64) -> Option<(GestureKind, u64)> {
        if self.pointer_id() != Some(pointer_id) {
            return None;
        }
        self.cancel()
    }

    /// Ends whatever gesture is alive.
    pub fn cancel(&mut self) -> Option<(GestureKind, u64)> {
        let ended = self.kind().zip(self.pointer_id());
        *self = Self::Idle;
        ended
    }
}
