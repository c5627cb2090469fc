mod brush;
mod gesture;

pub use brush::{
    BRUSH_EDGE_PX, BRUSH_MIN_WIDTH_PX, BrushGesture, BrushMode, BrushPixels, brush_pixels,
    brush_range_to_view, hover_cursor, resolve_brush_mode,
};
pub use gesture::{
    GestureKind, GestureState, PanGesture, resolve_drag_pan, wheel_zoom_factor,
};

use serde::{Deserialize, Serialize};

use crate::core::types::ViewWindow;
use crate::error::{TimelineError, TimelineResult};

pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.0015;

/// Input tuning and per-gesture enable switches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// `k` in `factor = exp(-delta * k)`.
    pub wheel_zoom_sensitivity: f64,
    pub brush_edge_px: f64,
    pub brush_min_width_px: f64,
    pub wheel_zoom_enabled: bool,
    pub drag_pan_enabled: bool,
    pub minimap_brush_enabled: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            wheel_zoom_sensitivity: WHEEL_ZOOM_SENSITIVITY,
            brush_edge_px: BRUSH_EDGE_PX,
            brush_min_width_px: BRUSH_MIN_WIDTH_PX,
            wheel_zoom_enabled: true,
            drag_pan_enabled: true,
            minimap_brush_enabled: true,
        }
    }
}

impl InteractionConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.wheel_zoom_sensitivity.is_finite() || self.wheel_zoom_sensitivity <= 0.0 {
            return Err(TimelineError::InvalidData(
                "wheel zoom sensitivity must be finite and > 0".to_owned(),
            ));
        }
        if !self.brush_edge_px.is_finite() || self.brush_edge_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "brush edge tolerance must be finite and >= 0".to_owned(),
            ));
        }
        if !self.brush_min_width_px.is_finite() || self.brush_min_width_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "brush minimum width must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Which drawing surface an input event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Timeline,
    Minimap,
}

/// Pointer position relative to the top-left corner of its surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub pointer_id: u64,
    pub x: f64,
    pub y: f64,
}

impl PointerInput {
    #[must_use]
    pub const fn new(pointer_id: u64, x: f64, y: f64) -> Self {
        Self { pointer_id, x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub x: f64,
    pub y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
}

impl WheelInput {
    #[must_use]
    pub const fn vertical(x: f64, delta_y: f64) -> Self {
        Self {
            x,
            y: 0.0,
            delta_x: 0.0,
            delta_y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorHint {
    #[default]
    Default,
    /// `ew-resize`
    ResizeHorizontal,
    Grab,
    Crosshair,
}

/// Pointer-capture instruction for the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaptureRequest {
    #[default]
    None,
    Capture(u64),
    Release(u64),
}

/// Result of feeding one input event to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointerResponse {
    pub view: ViewWindow,
    pub cursor: CursorHint,
    pub capture: CaptureRequest,
    /// `true` when the host should suppress the platform default action.
    pub handled: bool,
}

/// Gesture finite-state machine plus the last hover affordance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct InteractionState {
    gesture: GestureState,
    cursor: CursorHint,
}

impl InteractionState {
    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorHint) {
        self.cursor = cursor;
    }

    /// Starts a gesture only from idle. Returns `false` if one is already alive.
    pub fn begin(&mut self, gesture: GestureState) -> bool {
        if !self.gesture.is_idle() || gesture.is_idle() {
            return false;
        }
        self.gesture = gesture;
        true
    }

    pub fn brush_mut(&mut self) -> Option<&mut BrushGesture> {
        match &mut self.gesture {
            GestureState::Brushing(brush) => Some(brush),
            _ => None,
        }
    }

    #[must_use]
    pub fn pan(&self) -> Option<PanGesture> {
        match self.gesture {
            GestureState::Panning(pan) => Some(pan),
            _ => None,
        }
    }

    pub fn finish(&mut self, pointer_id: u64) -> Option<(GestureKind, u64)> {
        let ended = self.gesture.finish(pointer_id);
        if ended.is_some() {
            self.cursor = CursorHint::Default;
        }
        ended
    }

    /// Drops any live gesture and resets the cursor.
    pub fn cancel(&mut self) -> Option<(GestureKind, u64)> {
        self.cursor = CursorHint::Default;
        self.gesture.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BrushGesture, BrushPixels, CursorHint, GestureState, InteractionConfig, InteractionState,
    };

    fn brush_gesture(pointer_id: u64) -> GestureState {
        GestureState::Brushing(BrushGesture::begin(
            pointer_id,
            50.0,
            BrushPixels { x0: 0.0, x1: 100.0 },
            8.0,
        ))
    }

    #[test]
    fn second_gesture_is_rejected_while_one_is_alive() {
        let mut state = InteractionState::default();
        assert!(state.begin(brush_gesture(1)));
        assert!(!state.begin(brush_gesture(2)));
        assert_eq!(state.gesture().pointer_id(), Some(1));
        assert!(state.brush_mut().is_some());
        assert!(state.pan().is_none());
    }

    #[test]
    fn cancel_resets_cursor_and_gesture() {
        let mut state = InteractionState::default();
        state.set_cursor(CursorHint::Grab);
        assert!(state.begin(brush_gesture(1)));
        assert!(state.cancel().is_some());
        assert!(state.gesture().is_idle());
        assert_eq!(state.cursor(), CursorHint::Default);
        assert!(!state.begin(GestureState::Idle));
    }

    #[test]
    fn config_rejects_non_positive_min_width() {
        let config = InteractionConfig {
            brush_min_width_px: 0.0,
            ..InteractionConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(InteractionConfig::default().validate().is_ok());
    }
}
