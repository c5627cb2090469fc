//! Minimap brush hit-testing and pixel-range commits.

use serde::{Deserialize, Serialize};

use crate::core::geometry::{clamp, pixel_to_time};
use crate::core::types::{DataExtent, TimeRange, ViewWindow};

use super::CursorHint;

pub const BRUSH_EDGE_PX: f64 = 8.0;
pub const BRUSH_MIN_WIDTH_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushMode {
    Left,
    Right,
    Move,
    Create,
}

/// Brush edges in minimap pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushPixels {
    pub x0: f64,
    pub x1: f64,
}

impl BrushPixels {
    #[must_use]
    pub fn width(self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn center(self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }
}

/// Projects the view window onto a minimap spanning the whole extent.
#[must_use]
pub fn brush_pixels(extent: DataExtent, view: ViewWindow, width: f64) -> BrushPixels {
    let span = extent.span().max(1.0);
    BrushPixels {
        x0: (view.start() - extent.start()) * width / span,
        x1: (view.end() - extent.start()) * width / span,
    }
}

/// Left edge, then right edge, then body, else create.
#[must_use]
pub fn resolve_brush_mode(x: f64, brush: BrushPixels, edge_px: f64) -> BrushMode {
    if (x - brush.x0).abs() <= edge_px {
        BrushMode::Left
    } else if (x - brush.x1).abs() <= edge_px {
        BrushMode::Right
    } else if x >= brush.x0 && x <= brush.x1 {
        BrushMode::Move
    } else {
        BrushMode::Create
    }
}

/// Cursor affordance while hovering the minimap with no gesture active.
#[must_use]
pub fn hover_cursor(x: f64, brush: BrushPixels, edge_px: f64) -> CursorHint {
    if (x - brush.x0).abs() <= edge_px || (x - brush.x1).abs() <= edge_px {
        CursorHint::ResizeHorizontal
    } else if x > brush.x0 && x < brush.x1 {
        CursorHint::Grab
    } else {
        CursorHint::Crosshair
    }
}

/// Converts a pixel range on the minimap into a proposed view.
///
/// The range is first clamped into `[0, width]` with at least
/// `min_width_px` between its edges.
#[must_use]
pub fn brush_range_to_view(
    extent: DataExtent,
    px0: f64,
    px1: f64,
    width: f64,
    min_width_px: f64,
) -> TimeRange {
    let bx0 = clamp(px0, 0.0, width - min_width_px);
    let bx1 = clamp(px1, bx0 + min_width_px, width);
    let to_time = |x: f64| pixel_to_time(x, extent.start(), extent.end(), 0.0, width);
    TimeRange::new(to_time(bx0), to_time(bx1))
}

/// Ephemeral state of one brush gesture, pointer down to pointer up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushGesture {
    pub pointer_id: u64,
    pub mode: BrushMode,
    pub anchor_x: f64,
    /// Brush edges when the gesture started.
    pub baseline: BrushPixels,
    pub create_start: f64,
    pub create_end: f64,
}

impl BrushGesture {
    #[must_use]
    pub fn begin(pointer_id: u64, x: f64, brush: BrushPixels, edge_px: f64) -> Self {
        Self {
            pointer_id,
            mode: resolve_brush_mode(x, brush, edge_px),
            anchor_x: x,
            baseline: brush,
            create_start: x,
            create_end: x,
        }
    }

    /// Pixel range to commit on pointer down. Only `Create` commits immediately.
    #[must_use]
    pub fn initial_range(self) -> Option<(f64, f64)> {
        (self.mode == BrushMode::Create).then_some((self.create_start, self.create_end))
    }

    /// Pixel range to commit for the pointer at `x`.
    ///
    /// Always derived from the baseline captured at pointer down, so the
    /// result depends only on the latest `x`.
    pub fn range_for(&mut self, x: f64, width: f64, min_width_px: f64) -> (f64, f64) {
        let BrushPixels { x0, x1 } = self.baseline;
        match self.mode {
            BrushMode::Left => (clamp(x, 0.0, x1 - min_width_px), x1),
            BrushMode::Right => (x0, clamp(x, x0 + min_width_px, width)),
            BrushMode::Move => {
                let dx = x - self.anchor_x;
                let mut nx0 = x0 + dx;
                let mut nx1 = x1 + dx;
                if nx0 < 0.0 {
                    nx1 -= nx0;
                    nx0 = 0.0;
                }
                if nx1 > width {
                    nx0 -= nx1 - width;
                    nx1 = width;
                }
                (nx0, nx1)
            }
            BrushMode::Create => {
                self.create_end = x;
                (
                    self.create_start.min(self.create_end),
                    self.create_start.max(self.create_end),
                )
            }
        }
    }
}
