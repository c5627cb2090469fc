use crate::core::geometry::clamp;
use crate::core::{RowBody, SpanKind, TimeMapper};
use crate::render::{MinimapFrame, MinimapSpan, Rect, Renderer};

use super::TimelineEngine;

const STRIP_INSET_PX: f64 = 10.0;
const STRIP_SPAN_MIN_WIDTH_PX: f64 = 1.0;
const STRIP_ALPHA: f64 = 0.6;
const BRUSH_MIN_DRAW_WIDTH_PX: f64 = 2.0;
const BRUSH_STROKE_WIDTH_PX: f64 = 2.0;

impl<R: Renderer> TimelineEngine<R> {
    /// Overview strip of every valve span over the whole extent, plus the
    /// brush for the current view.
    pub(super) fn build_minimap_frame(&self) -> MinimapFrame {
        let viewport = self.minimap_viewport;
        let width = viewport.width;
        let height = viewport.height;
        let extent = self.state.extent().as_range();
        let mapper = TimeMapper::for_extent(self.state.extent(), width);
        let strip_height = (height - 2.0 * STRIP_INSET_PX).max(0.0);
        let x_of = |time: f64| clamp(mapper.time_to_pixel(time), 0.0, width);

        let spans = self
            .rows
            .iter()
            .filter_map(|row| match &row.body {
                RowBody::Valve { spans } => Some(spans),
                RowBody::Gauge { .. } => None,
            })
            .flatten()
            .filter(|span| extent.overlaps(span.start, span.end))
            .map(|span| {
                let x0 = x_of(span.start);
                let x1 = x_of(span.end);
                MinimapSpan {
                    rect: Rect::new(
                        x0,
                        STRIP_INSET_PX,
                        STRIP_SPAN_MIN_WIDTH_PX.max(x1 - x0),
                        strip_height,
                    ),
                    color: if span.kind == SpanKind::Missing {
                        self.style.muted
                    } else {
                        self.style.minimap_span
                    },
                }
            })
            .collect();

        let brush = self.brush_pixels();
        let brush_width = BRUSH_MIN_DRAW_WIDTH_PX.max(brush.width());
        let inset = BRUSH_STROKE_WIDTH_PX / 2.0;
        MinimapFrame {
            viewport,
            spans,
            span_alpha: STRIP_ALPHA,
            brush: Rect::new(brush.x0, 0.0, brush_width, height),
            brush_fill: self.style.brush_fill,
            brush_outline: Rect::new(
                brush.x0 + inset,
                inset,
                (brush_width - BRUSH_STROKE_WIDTH_PX).max(0.0),
                (height - BRUSH_STROKE_WIDTH_PX).max(0.0),
            ),
            brush_stroke: self.style.brush_stroke,
            brush_stroke_width: BRUSH_STROKE_WIDTH_PX,
            cursor: self.interaction.cursor(),
        }
    }
}
