use serde::{Deserialize, Serialize};

use crate::core::{TimeRange, Viewport};
use crate::interaction::GestureKind;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineContext {
    pub timeline_viewport: Viewport,
    pub minimap_viewport: Viewport,
    pub data_extent: TimeRange,
    pub view: TimeRange,
    pub rows_len: usize,
    pub active_gesture: Option<GestureKind>,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    ViewChanged { start: f64, end: f64 },
    ExtentChanged { start: f64, end: f64 },
    RowsReset { rows_len: usize },
    GestureStarted { kind: GestureKind },
    GestureEnded { kind: GestureKind },
    Rendered,
}

/// Extension hook interface for bounded custom logic.
pub trait TimelinePlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: TimelineEvent, context: TimelineContext);
}
