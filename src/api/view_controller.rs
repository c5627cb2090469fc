use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    DataExtent, PeriodPreset, TimeRange, ViewWindow, Viewport, resolve_period_extent,
};
use crate::error::TimelineResult;
use crate::render::Renderer;

use super::{TimelineEngine, TimelineEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetViewOptions {
    /// Skip the outbound view-changed notification, e.g. when the host is
    /// pushing its own authoritative view back in.
    pub silent: bool,
}

impl SetViewOptions {
    #[must_use]
    pub const fn silent() -> Self {
        Self { silent: true }
    }
}

impl<R: Renderer> TimelineEngine<R> {
    /// Clamps and applies a proposed window.
    pub fn set_view(&mut self, proposed: TimeRange, options: SetViewOptions) -> ViewWindow {
        if self.destroyed {
            return self.state.view();
        }
        let before = self.state.view();
        self.state.set_view(proposed);
        self.commit_view(before, options.silent, "set_view")
    }

    /// Replaces the loaded extent and re-clamps the current window into it.
    ///
    /// Extent changes come from the host, so no outbound notification is
    /// scheduled even when the window has to move.
    pub fn set_data_extent(&mut self, extent: DataExtent) -> ViewWindow {
        if self.destroyed {
            return self.state.view();
        }
        let before = self.state.view();
        self.state.set_data_extent(extent);
        debug!(
            start = extent.start(),
            end = extent.end(),
            "set data extent"
        );
        self.emit_plugin_event(TimelineEvent::ExtentChanged {
            start: extent.start(),
            end: extent.end(),
        });
        self.commit_view(before, true, "set_data_extent")
    }

    /// Zooms by `factor` keeping the time under `pixel_x` of a
    /// `total_pixel_width` wide area fixed.
    pub fn zoom_around_pixel(
        &mut self,
        factor: f64,
        pixel_x: f64,
        total_pixel_width: f64,
    ) -> ViewWindow {
        if self.destroyed {
            return self.state.view();
        }
        let before = self.state.view();
        self.state
            .zoom_around_pixel(factor, pixel_x, total_pixel_width);
        self.commit_view(before, false, "zoom_around_pixel")
    }

    pub fn zoom_around_center(&mut self, factor: f64) -> ViewWindow {
        if self.destroyed {
            return self.state.view();
        }
        let before = self.state.view();
        self.state.zoom_around_center(factor);
        self.commit_view(before, false, "zoom_around_center")
    }

    /// Toolbar zoom in (`0.8` of the current span).
    pub fn zoom_in(&mut self) -> ViewWindow {
        self.zoom_around_center(0.8)
    }

    /// Toolbar zoom out (`1.25` of the current span).
    pub fn zoom_out(&mut self) -> ViewWindow {
        self.zoom_around_center(1.25)
    }

    pub fn shift_by_fraction(&mut self, fraction: f64) -> ViewWindow {
        if self.destroyed {
            return self.state.view();
        }
        let before = self.state.view();
        self.state.shift_by_fraction(fraction);
        self.commit_view(before, false, "shift_by_fraction")
    }

    pub fn reset_view_to_extent(&mut self) -> ViewWindow {
        if self.destroyed {
            return self.state.view();
        }
        let before = self.state.view();
        self.state.reset_to_extent();
        self.commit_view(before, false, "reset_view_to_extent")
    }

    /// Resolves a period preset at `at_ms`, loads it as the new extent and
    /// shows it whole.
    pub fn load_period(
        &mut self,
        at_ms: f64,
        preset: PeriodPreset,
        availability: Option<DataExtent>,
    ) -> TimelineResult<ViewWindow> {
        if self.destroyed {
            return Ok(self.state.view());
        }
        let extent = resolve_period_extent(at_ms, preset, self.calendar, availability)?;
        debug!(
            at_ms,
            duration_ms = preset.duration_ms,
            anchor = ?preset.anchor,
            start = extent.start(),
            end = extent.end(),
            "load period"
        );
        let before = self.state.view();
        self.state.set_data_extent(extent);
        self.state.reset_to_extent();
        self.emit_plugin_event(TimelineEvent::ExtentChanged {
            start: extent.start(),
            end: extent.end(),
        });
        Ok(self.commit_view(before, false, "load_period"))
    }

    /// Resizes both surfaces. The view window is unaffected.
    pub fn resize(&mut self, timeline: Viewport, minimap: Viewport) -> TimelineResult<()> {
        if self.destroyed {
            return Ok(());
        }
        let timeline = timeline.validate()?;
        let minimap = minimap.validate()?;
        self.timeline_viewport = timeline;
        self.minimap_viewport = minimap;
        trace!(
            timeline_width = timeline.width,
            timeline_height = timeline.height,
            minimap_width = minimap.width,
            minimap_height = minimap.height,
            "resize surfaces"
        );
        self.render_after_mutation("resize");
        Ok(())
    }

    /// Drawable width right of the label gutter.
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        (self.timeline_viewport.width - self.layout.gutter_px).max(0.0)
    }

    /// Shared tail of every view mutation: plugin event on change, outbound
    /// notification unless silent, then the implicit render.
    pub(super) fn commit_view(
        &mut self,
        before: ViewWindow,
        silent: bool,
        operation: &'static str,
    ) -> ViewWindow {
        let after = self.state.view();
        if after != before {
            trace!(
                operation,
                start = after.start(),
                end = after.end(),
                "view changed"
            );
            self.emit_view_changed();
        }
        if !silent {
            self.schedule_view_notification();
        }
        self.render_after_mutation(operation);
        after
    }
}
