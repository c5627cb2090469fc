use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::axis::{AxisModes, TickSpec};
use crate::core::{RowKind, TimeRange, Viewport};
use crate::interaction::{BrushPixels, CursorHint, GestureKind};

use super::PendingNotification;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowLayoutSnapshot {
    pub kind: RowKind,
    pub y: f64,
    pub height: f64,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub timeline_viewport: Viewport,
    pub minimap_viewport: Viewport,
    pub data_extent: TimeRange,
    pub view: TimeRange,
    pub tick_spec: TickSpec,
    pub axis_modes: AxisModes,
    /// Keyed by row id in display order. A repeated id keeps its first
    /// position and the last row's geometry.
    pub rows: IndexMap<String, RowLayoutSnapshot>,
    pub brush: BrushPixels,
    pub active_gesture: Option<GestureKind>,
    pub cursor: CursorHint,
    pub pending_notification: Option<PendingNotification>,
}
