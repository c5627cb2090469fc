use serde::Serialize;
use tracing::{debug, warn};

use crate::axis::AxisLabelFormats;
use crate::core::{Calendar, DataExtent, Row, ViewState, ViewWindow, Viewport};
use crate::error::TimelineResult;
use crate::extensions::TimelinePlugin;
use crate::interaction::{CaptureRequest, InteractionConfig, InteractionState};
use crate::render::Renderer;

use super::data_controller::canonicalize_rows;
use super::view_notification::{Clock, SystemClock, ViewNotifier};
use super::{LayoutConfig, TimelineEngineConfig, TimelineEvent, TimelineStyle};

/// `{data extent, view}` as the host reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineState {
    pub data_extent: DataExtent,
    pub view: ViewWindow,
}

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the view state, the gesture machine and the row set,
/// and hands a fresh `RenderFrame` to its renderer after every mutation.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) timeline_viewport: Viewport,
    pub(super) minimap_viewport: Viewport,
    pub(super) state: ViewState,
    pub(super) rows: Vec<Row>,
    pub(super) layout: LayoutConfig,
    pub(super) style: TimelineStyle,
    pub(super) interaction_config: InteractionConfig,
    pub(super) formats: AxisLabelFormats,
    pub(super) calendar: Calendar,
    pub(super) interaction: InteractionState,
    pub(super) notifier: ViewNotifier,
    pub(super) notify_view_changes: bool,
    pub(super) clock: Box<dyn Clock>,
    pub(super) plugins: Vec<Box<dyn TimelinePlugin>>,
    pub(super) destroyed: bool,
}

impl<R: Renderer> TimelineEngine<R> {
    /// Creates an engine on the wall clock and renders the first frame.
    pub fn new(renderer: R, config: TimelineEngineConfig, rows: Vec<Row>) -> TimelineResult<Self> {
        Self::with_clock(renderer, config, rows, Box::new(SystemClock))
    }

    /// Same as [`TimelineEngine::new`] with an injected notification clock.
    pub fn with_clock(
        renderer: R,
        config: TimelineEngineConfig,
        rows: Vec<Row>,
        clock: Box<dyn Clock>,
    ) -> TimelineResult<Self> {
        config.validate()?;
        let initial_view = config
            .initial_view
            .unwrap_or_else(|| config.data_extent.as_range());
        let state = ViewState::new(config.data_extent, initial_view);
        let rows = canonicalize_rows(rows);
        debug!(
            rows = rows.len(),
            extent_start = config.data_extent.start(),
            extent_end = config.data_extent.end(),
            view_start = state.view().start(),
            view_end = state.view().end(),
            "create timeline engine"
        );

        let mut engine = Self {
            renderer,
            timeline_viewport: config.timeline_viewport,
            minimap_viewport: config.minimap_viewport,
            state,
            rows,
            layout: config.layout,
            style: config.style,
            interaction_config: config.interaction,
            formats: config.axis_formats,
            calendar: Calendar::new(config.time_zone),
            interaction: InteractionState::default(),
            notifier: ViewNotifier::new(config.notification.quiet_period_ms),
            notify_view_changes: config.notification.notify_view_changes,
            clock,
            plugins: Vec::new(),
            destroyed: false,
        };
        engine.render()?;
        Ok(engine)
    }

    #[must_use]
    pub fn state(&self) -> TimelineState {
        TimelineState {
            data_extent: self.state.extent(),
            view: self.state.view(),
        }
    }

    #[must_use]
    pub fn view(&self) -> ViewWindow {
        self.state.view()
    }

    #[must_use]
    pub fn data_extent(&self) -> DataExtent {
        self.state.extent()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    #[must_use]
    pub fn timeline_viewport(&self) -> Viewport {
        self.timeline_viewport
    }

    #[must_use]
    pub fn minimap_viewport(&self) -> Viewport {
        self.minimap_viewport
    }

    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Builds the frame for the current state and hands it to the renderer.
    pub fn render(&mut self) -> TimelineResult<()> {
        if self.destroyed {
            return Ok(());
        }
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        self.emit_plugin_event(TimelineEvent::Rendered);
        Ok(())
    }

    /// Implicit render at the end of a mutating call. Failures are logged and
    /// the state change stands.
    pub(super) fn render_after_mutation(&mut self, operation: &'static str) {
        if let Err(err) = self.render() {
            warn!(error = %err, operation, "render after state change failed");
        }
    }

    /// Releases gesture and capture state, pending notifications and plugins.
    ///
    /// Safe to call repeatedly. Afterwards every mutating call is a no-op that
    /// returns the current view.
    pub fn destroy(&mut self) -> CaptureRequest {
        if self.destroyed {
            return CaptureRequest::None;
        }
        let release = self
            .interaction
            .cancel()
            .map_or(CaptureRequest::None, |(_, pointer_id)| {
                CaptureRequest::Release(pointer_id)
            });
        self.notifier.clear();
        self.plugins.clear();
        self.destroyed = true;
        debug!("destroy timeline engine");
        release
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
