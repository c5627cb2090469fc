use tracing::{debug, trace};

use crate::core::geometry::clamp;
use crate::core::ViewWindow;
use crate::interaction::{
    BrushGesture, BrushMode, BrushPixels, CaptureRequest, CursorHint, GestureKind, GestureState,
    PanGesture, PointerInput, PointerResponse, Surface, WheelInput, brush_pixels,
    brush_range_to_view, hover_cursor, wheel_zoom_factor,
};
use crate::render::Renderer;

use super::{TimelineEngine, TimelineEvent};

impl<R: Renderer> TimelineEngine<R> {
    /// Brush edges for the current view on the minimap.
    #[must_use]
    pub fn brush_pixels(&self) -> BrushPixels {
        brush_pixels(
            self.state.extent(),
            self.state.view(),
            self.minimap_viewport.width,
        )
    }

    /// Starts a drag pan on the timeline or a brush gesture on the minimap.
    ///
    /// Ignored while another gesture is alive.
    pub fn pointer_down(&mut self, surface: Surface, input: PointerInput) -> PointerResponse {
        if self.destroyed || !self.interaction.gesture().is_idle() {
            return self.unhandled();
        }
        match surface {
            Surface::Timeline => self.begin_pan(input),
            Surface::Minimap => self.begin_brush(input),
        }
    }

    /// Advances the live gesture, or updates the hover cursor when idle.
    pub fn pointer_move(&mut self, surface: Surface, input: PointerInput) -> PointerResponse {
        if self.destroyed {
            return self.unhandled();
        }
        match (surface, self.interaction.gesture()) {
            (Surface::Timeline, GestureState::Panning(pan))
                if pan.pointer_id == input.pointer_id =>
            {
                let before = self.state.view();
                self.state.set_view(pan.target(input.x));
                let view = self.commit_view(before, false, "drag_pan");
                self.handled(view, CaptureRequest::None)
            }
            (Surface::Minimap, GestureState::Brushing(brush))
                if brush.pointer_id == input.pointer_id =>
            {
                let width = self.minimap_viewport.width;
                let min_width = self.interaction_config.brush_min_width_px;
                let range = self
                    .interaction
                    .brush_mut()
                    .map(|gesture| gesture.range_for(input.x, width, min_width));
                let view = match range {
                    Some((px0, px1)) => self.commit_brush_range(px0, px1, "brush"),
                    None => self.state.view(),
                };
                self.handled(view, CaptureRequest::None)
            }
            (Surface::Minimap, GestureState::Idle) => {
                if self.interaction_config.minimap_brush_enabled {
                    let cursor = hover_cursor(
                        input.x,
                        self.brush_pixels(),
                        self.interaction_config.brush_edge_px,
                    );
                    self.interaction.set_cursor(cursor);
                }
                self.unhandled()
            }
            _ => self.unhandled(),
        }
    }

    /// Ends the gesture owned by `input.pointer_id` and releases its capture.
    pub fn pointer_up(&mut self, _surface: Surface, input: PointerInput) -> PointerResponse {
        self.end_gesture(input.pointer_id, "pointer up")
    }

    pub fn pointer_cancel(&mut self, _surface: Surface, input: PointerInput) -> PointerResponse {
        self.end_gesture(input.pointer_id, "pointer cancel")
    }

    /// Leaving a surface ends a live gesture there; otherwise it only resets
    /// the hover cursor.
    pub fn pointer_leave(&mut self, surface: Surface, input: PointerInput) -> PointerResponse {
        if self.destroyed {
            return self.unhandled();
        }
        let owns_gesture = match self.interaction.gesture() {
            GestureState::Panning(pan) => {
                surface == Surface::Timeline && pan.pointer_id == input.pointer_id
            }
            GestureState::Brushing(brush) => {
                surface == Surface::Minimap && brush.pointer_id == input.pointer_id
            }
            GestureState::Idle => false,
        };
        if owns_gesture {
            return self.end_gesture(input.pointer_id, "pointer leave");
        }
        if self.interaction.gesture().is_idle() {
            self.interaction.set_cursor(CursorHint::Default);
        }
        self.unhandled()
    }

    /// Zooms around the cursor with an exponential response to the dominant
    /// wheel delta. Ignored while a gesture is alive.
    pub fn wheel(&mut self, surface: Surface, input: WheelInput) -> PointerResponse {
        if self.destroyed
            || surface != Surface::Timeline
            || !self.interaction_config.wheel_zoom_enabled
            || !self.interaction.gesture().is_idle()
        {
            return self.unhandled();
        }
        let factor = wheel_zoom_factor(
            input.delta_x,
            input.delta_y,
            self.interaction_config.wheel_zoom_sensitivity,
        );
        let width = self.inner_width();
        let anchor = clamp(input.x - self.layout.gutter_px, 0.0, width);
        trace!(factor, anchor, width, "wheel zoom");
        let before = self.state.view();
        self.state.zoom_around_pixel(factor, anchor, width);
        let view = self.commit_view(before, false, "wheel_zoom");
        self.handled(view, CaptureRequest::None)
    }

    fn begin_pan(&mut self, input: PointerInput) -> PointerResponse {
        if !self.interaction_config.drag_pan_enabled || input.x < self.layout.gutter_px {
            return self.unhandled();
        }
        let pan = PanGesture {
            pointer_id: input.pointer_id,
            press_x: input.x,
            baseline: self.state.view(),
            width: self.inner_width(),
        };
        if !self.interaction.begin(GestureState::Panning(pan)) {
            return self.unhandled();
        }
        self.interaction.set_cursor(CursorHint::Grab);
        debug!(pointer_id = input.pointer_id, x = input.x, "pan started");
        self.emit_plugin_event(TimelineEvent::GestureStarted {
            kind: GestureKind::Pan,
        });
        self.handled(self.state.view(), CaptureRequest::Capture(input.pointer_id))
    }

    fn begin_brush(&mut self, input: PointerInput) -> PointerResponse {
        if !self.interaction_config.minimap_brush_enabled {
            return self.unhandled();
        }
        let gesture = BrushGesture::begin(
            input.pointer_id,
            input.x,
            self.brush_pixels(),
            self.interaction_config.brush_edge_px,
        );
        if !self.interaction.begin(GestureState::Brushing(gesture)) {
            return self.unhandled();
        }
        self.interaction.set_cursor(match gesture.mode {
            BrushMode::Left | BrushMode::Right => CursorHint::ResizeHorizontal,
            BrushMode::Move => CursorHint::Grab,
            BrushMode::Create => CursorHint::Crosshair,
        });
        debug!(
            pointer_id = input.pointer_id,
            x = input.x,
            mode = ?gesture.mode,
            "brush started"
        );
        self.emit_plugin_event(TimelineEvent::GestureStarted {
            kind: GestureKind::Brush(gesture.mode),
        });
        let view = match gesture.initial_range() {
            Some((px0, px1)) => self.commit_brush_range(px0, px1, "brush_create"),
            None => self.state.view(),
        };
        self.handled(view, CaptureRequest::Capture(input.pointer_id))
    }

    /// Clamps a minimap pixel range to the minimum brush width and commits it.
    fn commit_brush_range(&mut self, px0: f64, px1: f64, operation: &'static str) -> ViewWindow {
        let proposed = brush_range_to_view(
            self.state.extent(),
            px0,
            px1,
            self.minimap_viewport.width,
            self.interaction_config.brush_min_width_px,
        );
        let before = self.state.view();
        self.state.set_view(proposed);
        self.commit_view(before, false, operation)
    }

    fn end_gesture(&mut self, pointer_id: u64, reason: &'static str) -> PointerResponse {
        if self.destroyed {
            return self.unhandled();
        }
        let Some((kind, pointer_id)) = self.interaction.finish(pointer_id) else {
            return self.unhandled();
        };
        debug!(pointer_id, ?kind, reason, "gesture ended");
        self.emit_plugin_event(TimelineEvent::GestureEnded { kind });
        self.handled(self.state.view(), CaptureRequest::Release(pointer_id))
    }

    fn handled(&self, view: ViewWindow, capture: CaptureRequest) -> PointerResponse {
        PointerResponse {
            view,
            cursor: self.interaction.cursor(),
            capture,
            handled: true,
        }
    }

    fn unhandled(&self) -> PointerResponse {
        PointerResponse {
            view: self.state.view(),
            cursor: self.interaction.cursor(),
            capture: CaptureRequest::None,
            handled: false,
        }
    }
}
