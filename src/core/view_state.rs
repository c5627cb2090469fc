use crate::core::geometry::{MINUTE_MS, pixel_to_time};
use crate::core::types::{DataExtent, TimeRange, ViewWindow};

/// Narrowest window the view may shrink to.
pub const MIN_SPAN_MS: f64 = 15.0 * MINUTE_MS;

/// Clamps a proposed window against `extent`.
///
/// The span is bounded to `[MIN_SPAN_MS, max(MIN_SPAN_MS, extent span)]`, then
/// the window is shifted (never rescaled) to sit flush against whichever edge
/// it overflows. Inverted proposals collapse to `MIN_SPAN_MS` at their start;
/// non-finite bounds are replaced by the matching extent bound.
///
/// When the extent itself is shorter than `MIN_SPAN_MS` the window keeps the
/// minimum span and ends flush with the extent end.
#[must_use]
pub fn clamp_view(extent: DataExtent, start: f64, end: f64) -> ViewWindow {
    let mut start = if start.is_finite() { start } else { extent.start() };
    let mut end = if end.is_finite() { end } else { extent.end() };

    let extent_span = extent.span();
    let max_span = MIN_SPAN_MS.max(extent_span);
    let span = MIN_SPAN_MS.max((end - start).min(max_span));

    if span >= extent_span && extent_span >= MIN_SPAN_MS {
        return ViewWindow::from_clamped(extent.start(), extent.end());
    }

    end = start + span;
    if start < extent.start() {
        start = extent.start();
        end = start + span;
    }
    if end > extent.end() {
        end = extent.end();
        start = end - span;
    }
    if extent_span >= MIN_SPAN_MS && start < extent.start() {
        // `end - span` can round below the extent start by an ulp.
        start = extent.start();
    }
    ViewWindow::from_clamped(start, end)
}

/// Owner of `{data extent, view window}`.
///
/// Every mutation re-runs [`clamp_view`], so the stored window always satisfies
/// the span and bounds invariants for the stored extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    extent: DataExtent,
    view: ViewWindow,
}

impl ViewState {
    #[must_use]
    pub fn new(extent: DataExtent, initial_view: TimeRange) -> Self {
        Self {
            extent,
            view: clamp_view(extent, initial_view.start, initial_view.end),
        }
    }

    #[must_use]
    pub fn extent(&self) -> DataExtent {
        self.extent
    }

    #[must_use]
    pub fn view(&self) -> ViewWindow {
        self.view
    }

    pub fn set_view(&mut self, proposed: TimeRange) -> ViewWindow {
        self.view = clamp_view(self.extent, proposed.start, proposed.end);
        self.view
    }

    /// Replaces the extent and re-clamps the current window against it.
    pub fn set_data_extent(&mut self, extent: DataExtent) -> ViewWindow {
        self.extent = extent;
        self.view = clamp_view(extent, self.view.start(), self.view.end());
        self.view
    }

    /// Scales the span by `factor` keeping the time under `pixel_x` fixed.
    ///
    /// `factor < 1` zooms in, `factor > 1` zooms out. Non-finite or
    /// non-positive factors leave the view unchanged.
    pub fn zoom_around_pixel(
        &mut self,
        factor: f64,
        pixel_x: f64,
        total_pixel_width: f64,
    ) -> ViewWindow {
        if !factor.is_finite() || factor <= 0.0 || !pixel_x.is_finite() {
            return self.view;
        }
        let view = self.view;
        // Without a drawable width there is no pixel to anchor on; use the middle.
        let anchor_time = if total_pixel_width.is_finite() && total_pixel_width > 0.0 {
            pixel_to_time(pixel_x, view.start(), view.end(), 0.0, total_pixel_width)
        } else {
            view.start() + view.span() * 0.5
        };
        let anchor_ratio = (anchor_time - view.start()) / view.span().max(1.0);
        let span = MIN_SPAN_MS.max((view.span() * factor).min(self.extent.span()));
        let start = anchor_time - span * anchor_ratio;
        self.set_view(TimeRange::new(start, start + span))
    }

    /// Toolbar-style zoom around the middle of the current window.
    pub fn zoom_around_center(&mut self, factor: f64) -> ViewWindow {
        self.zoom_around_pixel(factor, 0.5, 1.0)
    }

    /// Translates the window by `fraction * span`; clamping may truncate the shift.
    pub fn shift_by_fraction(&mut self, fraction: f64) -> ViewWindow {
        if !fraction.is_finite() {
            return self.view;
        }
        let delta = self.view.span() * fraction;
        self.set_view(TimeRange::new(
            self.view.start() + delta,
            self.view.end() + delta,
        ))
    }

    pub fn reset_to_extent(&mut self) -> ViewWindow {
        self.set_view(self.extent.as_range())
    }
}
