mod frame;
mod null_renderer;
mod primitives;

pub use frame::{
    AxisFrame, GaugeTrace, GridFrame, MinimapFrame, MinimapSpan, RenderFrame, RowContent,
    RowFrame, SpanShape, TimelineFrame,
};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, Fill, FontWeight, Point, Rect, TextBaseline, TextPrimitive, VerticalLine,
    estimate_text_width_px,
};

use crate::error::TimelineResult;

/// Drawing-surface collaborator.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` and own
/// every paint call. Text measurement lives here too since only the backend
/// knows its fonts; the default is a deterministic estimate.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()>;

    fn measure_text(&self, text: &str, font_size_px: f64) -> f64 {
        estimate_text_width_px(text, font_size_px)
    }
}
