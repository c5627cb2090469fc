use serde::Serialize;

use crate::axis::AxisModes;
use crate::core::{SpanKind, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::CursorHint;
use crate::render::primitives::validate_points;
use crate::render::{Color, Fill, Point, Rect, TextPrimitive, VerticalLine};

/// Axis labels for both bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisFrame {
    pub modes: AxisModes,
    /// Area the labels are clipped to: right of the gutter, above the rows.
    pub clip: Rect,
    pub top_labels: Vec<TextPrimitive>,
    pub bottom_labels: Vec<TextPrimitive>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridFrame {
    pub lines: Vec<VerticalLine>,
    pub minor: Vec<VerticalLine>,
    pub color: Color,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpanShape {
    pub kind: SpanKind,
    pub rect: Rect,
    pub corner_radius: f64,
    pub fill: Fill,
    pub alpha: f64,
    pub outline: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeTrace {
    pub lane: Rect,
    /// Visible sample range the lane is scaled to.
    pub value_min: f64,
    pub value_max: f64,
    pub polyline: Vec<Point>,
    /// Polyline closed down to the lane bottom at both ends.
    pub fill_path: Vec<Point>,
    pub stroke: Color,
    pub stroke_width: f64,
    pub fill: Fill,
    pub fill_alpha: f64,
    pub gaps: Vec<Rect>,
    pub gap_color: Color,
    pub gap_alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowContent {
    Spans { spans: Vec<SpanShape> },
    Trace(GaugeTrace),
    /// Nothing visible, e.g. a gauge with fewer than two samples in view.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFrame {
    pub id: String,
    pub y: f64,
    pub height: f64,
    pub background: Rect,
    pub background_color: Color,
    pub labels: Vec<TextPrimitive>,
    pub content: RowContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineFrame {
    /// Surface size; the height is the laid-out content height.
    pub viewport: Viewport,
    pub inner_left: f64,
    pub inner_right: f64,
    pub axis: AxisFrame,
    pub grid: GridFrame,
    pub rows: Vec<RowFrame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinimapSpan {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimapFrame {
    pub viewport: Viewport,
    pub spans: Vec<MinimapSpan>,
    pub span_alpha: f64,
    pub brush: Rect,
    pub brush_fill: Color,
    /// Stroke rect inset by half the stroke width.
    pub brush_outline: Rect,
    pub brush_stroke: Color,
    pub brush_stroke_width: f64,
    pub cursor: CursorHint,
}

/// Backend-agnostic description of one draw pass over both surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub timeline: TimelineFrame,
    pub minimap: MinimapFrame,
}

fn validate_alpha(alpha: f64) -> TimelineResult<()> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(TimelineError::InvalidData(
            "alpha must be finite and in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}

impl RowFrame {
    fn validate(&self) -> TimelineResult<()> {
        self.background.validate()?;
        self.background_color.validate()?;
        for label in &self.labels {
            label.validate()?;
        }
        match &self.content {
            RowContent::Spans { spans } => {
                for span in spans {
                    span.rect.validate()?;
                    span.fill.validate()?;
                    validate_alpha(span.alpha)?;
                    if let Some(outline) = span.outline {
                        outline.validate()?;
                    }
                }
            }
            RowContent::Trace(trace) => {
                trace.lane.validate()?;
                validate_points(&trace.polyline)?;
                validate_points(&trace.fill_path)?;
                trace.stroke.validate()?;
                trace.fill.validate()?;
                validate_alpha(trace.fill_alpha)?;
                validate_alpha(trace.gap_alpha)?;
                for gap in &trace.gaps {
                    gap.validate()?;
                }
            }
            RowContent::Empty => {}
        }
        Ok(())
    }
}

impl TimelineFrame {
    pub fn validate(&self) -> TimelineResult<()> {
        self.viewport.validate()?;
        self.axis.clip.validate()?;
        for label in self.axis.top_labels.iter().chain(&self.axis.bottom_labels) {
            label.validate()?;
        }
        self.grid.color.validate()?;
        validate_alpha(self.grid.alpha)?;
        for line in self.grid.lines.iter().chain(&self.grid.minor) {
            line.validate()?;
        }
        for row in &self.rows {
            row.validate()?;
        }
        Ok(())
    }
}

impl MinimapFrame {
    pub fn validate(&self) -> TimelineResult<()> {
        self.viewport.validate()?;
        validate_alpha(self.span_alpha)?;
        for span in &self.spans {
            span.rect.validate()?;
            span.color.validate()?;
        }
        self.brush.validate()?;
        self.brush_outline.validate()?;
        self.brush_fill.validate()?;
        self.brush_stroke.validate()
    }
}

impl RenderFrame {
    pub fn validate(&self) -> TimelineResult<()> {
        self.timeline.validate()?;
        self.minimap.validate()
    }

    #[must_use]
    pub fn label_count(&self) -> usize {
        let row_labels: usize = self.timeline.rows.iter().map(|row| row.labels.len()).sum();
        self.timeline.axis.top_labels.len() + self.timeline.axis.bottom_labels.len() + row_labels
    }

    #[must_use]
    pub fn span_count(&self) -> usize {
        self.timeline
            .rows
            .iter()
            .map(|row| match &row.content {
                RowContent::Spans { spans } => spans.len(),
                _ => 0,
            })
            .sum()
    }
}
