use crate::axis::build_axis_bands;
use crate::core::geometry::clamp;
use crate::core::{
    Row, RowBody, RowLabel, RowSlot, Sample, Span, SpanKind, TimeMapper, TimeRange, ViewWindow,
    Viewport, layout_rows,
};
use crate::render::{
    AxisFrame, Fill, FontWeight, GaugeTrace, GridFrame, Point, Rect, RenderFrame, Renderer,
    RowContent, RowFrame, SpanShape, TextBaseline, TextPrimitive, TimelineFrame, VerticalLine,
};

use super::{LayoutConfig, TimelineEngine, TimelineStyle};

const LABEL_INSET_PX: f64 = 12.0;
const VALVE_LANE_MIN_PX: f64 = 12.0;
const VALVE_LANE_PADDING_PX: f64 = 10.0;
const VALVE_CORNER_MAX_PX: f64 = 6.0;
const SPAN_MIN_WIDTH_PX: f64 = 2.0;
const MISSING_SPAN_ALPHA: f64 = 0.4;
const GAUGE_LANE_MIN_PX: f64 = 12.0;
const GAUGE_PAD_MIN_PX: f64 = 6.0;
const GAUGE_PAD_RATIO: f64 = 0.2;
const GAUGE_VALUE_RANGE_FLOOR: f64 = 1e-6;
const GAUGE_STROKE_WIDTH_PX: f64 = 2.0;
const GAUGE_FILL_ALPHA: f64 = 0.65;
const GAP_MIN_WIDTH_PX: f64 = 1.0;
const GAP_ALPHA: f64 = 0.3;

/// Horizontal frame of the row content area right of the gutter.
#[derive(Debug, Clone, Copy)]
struct ContentArea {
    view: ViewWindow,
    mapper: TimeMapper,
    inner_left: f64,
    inner_right: f64,
}

impl ContentArea {
    fn x_of(self, time: f64) -> f64 {
        clamp(
            self.mapper.time_to_pixel(time),
            self.inner_left,
            self.inner_right,
        )
    }

    fn is_visible(self, start: f64, end: f64) -> bool {
        self.view.as_range().overlaps(start, end)
    }
}

impl<R: Renderer> TimelineEngine<R> {
    /// Materializes both surfaces for the current state.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        RenderFrame {
            timeline: self.build_timeline_frame(),
            minimap: self.build_minimap_frame(),
        }
    }

    fn build_timeline_frame(&self) -> TimelineFrame {
        let width = self.timeline_viewport.width;
        let inner_left = self.layout.gutter_px.min(width);
        let inner_right = width.max(inner_left);
        let view = self.state.view();
        let metrics = self.layout.axis_bands;
        let axis_height = metrics.total_height();
        let layout = layout_rows(
            &self.rows,
            self.layout.row_sizing(),
            axis_height,
            self.layout.bottom_padding_px,
        );

        let axis_font = self.layout.axis_font_px;
        let bands = build_axis_bands(
            self.calendar,
            view,
            inner_left,
            inner_right,
            &self.formats,
            |text| self.renderer.measure_text(text, axis_font),
        );

        let axis = AxisFrame {
            modes: bands.modes,
            clip: Rect::new(
                inner_left,
                0.0,
                inner_right - inner_left,
                layout.total_height,
            ),
            top_labels: band_text(
                bands.top.iter().map(|label| (label.text.as_str(), label.x)),
                metrics.top_baseline(),
                axis_font,
                &self.style,
                FontWeight::Medium,
            ),
            bottom_labels: band_text(
                bands.bottom.iter().map(|label| (label.text.as_str(), label.x)),
                metrics.bottom_baseline(),
                axis_font,
                &self.style,
                FontWeight::Regular,
            ),
        };

        let grid_line = |x: f64| VerticalLine {
            x,
            y_top: axis_height,
            y_bottom: layout.content_bottom,
        };
        let grid = GridFrame {
            lines: bands.grid.iter().map(|line| grid_line(line.x)).collect(),
            minor: bands.subticks.iter().copied().map(grid_line).collect(),
            color: self.style.grid,
            alpha: self.style.grid_alpha,
        };

        let area = ContentArea {
            view,
            mapper: TimeMapper::for_view(view, inner_left, inner_right),
            inner_left,
            inner_right,
        };
        let rows = self
            .rows
            .iter()
            .zip(&layout.slots)
            .enumerate()
            .map(|(index, (row, slot))| self.build_row_frame(index, row, *slot, width, area))
            .collect();

        TimelineFrame {
            viewport: Viewport::new(width, layout.total_height),
            inner_left,
            inner_right,
            axis,
            grid,
            rows,
        }
    }

    fn build_row_frame(
        &self,
        index: usize,
        row: &Row,
        slot: RowSlot,
        width: f64,
        area: ContentArea,
    ) -> RowFrame {
        let background_color = if index % 2 == 0 {
            self.style.row_background_alt
        } else {
            self.style.row_background
        };
        let content = match &row.body {
            RowBody::Valve { spans } => RowContent::Spans {
                spans: valve_shapes(spans, slot, area, &self.style),
            },
            RowBody::Gauge { samples, gaps } => {
                gauge_trace(samples, gaps, slot, area, &self.style)
                    .map_or(RowContent::Empty, RowContent::Trace)
            }
        };
        RowFrame {
            id: row.id.clone(),
            y: slot.y,
            height: slot.height,
            background: Rect::new(0.0, slot.y, width, slot.height),
            background_color,
            labels: row_labels(&row.label, slot, &self.layout, &self.style),
            content,
        }
    }
}

fn band_text<'a>(
    labels: impl Iterator<Item = (&'a str, f64)>,
    baseline_y: f64,
    font_size_px: f64,
    style: &TimelineStyle,
    weight: FontWeight,
) -> Vec<TextPrimitive> {
    labels
        .filter(|(text, _)| !text.is_empty())
        .map(|(text, x)| {
            TextPrimitive::new(
                text,
                x,
                baseline_y,
                font_size_px,
                TextBaseline::Alphabetic,
                style.text,
            )
            .with_weight(weight)
        })
        .collect()
}

/// Name (or serial) plus the serial underneath when both are present.
///
/// Inline labels sit in the gutter centered on the row; stacked labels sit
/// at the top of the lane right of the gutter.
fn row_labels(
    label: &RowLabel,
    slot: RowSlot,
    layout: &LayoutConfig,
    style: &TimelineStyle,
) -> Vec<TextPrimitive> {
    let primary = label.primary();
    if primary.is_empty() {
        return Vec::new();
    }
    let base = layout.row_font_px;
    let secondary_font = (base * 0.9).round().max(10.0);
    let RowSlot { y, height } = slot;

    let (x, primary_y, secondary_y, baseline) = if layout.label_stack {
        let top_line = y + (height * 0.4).min(base + 4.0);
        let secondary_y = (y + height - 6.0).min(top_line + base + 6.0);
        (
            layout.gutter_px + LABEL_INSET_PX,
            top_line,
            secondary_y,
            TextBaseline::Alphabetic,
        )
    } else {
        let middle = y + height / 2.0;
        let secondary_y = (y + height - 8.0).min(middle + base);
        (LABEL_INSET_PX, middle, secondary_y, TextBaseline::Middle)
    };

    let mut labels = vec![
        TextPrimitive::new(primary, x, primary_y, base, baseline, style.text)
            .with_weight(FontWeight::Medium),
    ];
    if let Some(serial) = label.secondary() {
        labels.push(TextPrimitive::new(
            serial,
            x,
            secondary_y,
            secondary_font,
            baseline,
            style.muted,
        ));
    }
    labels
}

fn valve_shapes(
    spans: &[Span],
    slot: RowSlot,
    area: ContentArea,
    style: &TimelineStyle,
) -> Vec<SpanShape> {
    let lane_height = VALVE_LANE_MIN_PX.max(slot.height - VALVE_LANE_PADDING_PX);
    let lane_top = slot.y + (slot.height - lane_height) / 2.0;
    let corner_radius = VALVE_CORNER_MAX_PX.min(lane_height / 2.0);

    spans
        .iter()
        .filter(|span| area.is_visible(span.start, span.end))
        .map(|span| {
            let x0 = area.x_of(span.start);
            let x1 = area.x_of(span.end);
            SpanShape {
                kind: span.kind,
                rect: Rect::new(
                    x0,
                    lane_top,
                    SPAN_MIN_WIDTH_PX.max(x1 - x0),
                    lane_height,
                ),
                corner_radius,
                fill: style.span_paint(span.kind).fill(),
                alpha: if span.kind == SpanKind::Missing {
                    MISSING_SPAN_ALPHA
                } else {
                    1.0
                },
                outline: (span.kind == SpanKind::Unexpected).then_some(style.unexpected_outline),
            }
        })
        .collect()
}

/// Trace over the samples inside the view, scaled to their own value range.
///
/// Returns `None` with fewer than two visible samples.
fn gauge_trace(
    samples: &[Sample],
    gaps: &[TimeRange],
    slot: RowSlot,
    area: ContentArea,
    style: &TimelineStyle,
) -> Option<GaugeTrace> {
    let view = area.view;
    let visible: Vec<Sample> = samples
        .iter()
        .copied()
        .filter(|sample| sample.t >= view.start() && sample.t <= view.end())
        .collect();
    if visible.len() < 2 {
        return None;
    }

    let pad = GAUGE_PAD_MIN_PX.max(slot.height * GAUGE_PAD_RATIO);
    let lane_top = slot.y + pad;
    let lane_bottom = slot.y + slot.height - pad;
    let lane_height = GAUGE_LANE_MIN_PX.max(lane_bottom - lane_top);

    let (value_min, value_max) = visible
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), sample| {
            (lo.min(sample.y), hi.max(sample.y))
        });
    let range = GAUGE_VALUE_RANGE_FLOOR.max(value_max - value_min);
    let y_of = |value: f64| lane_bottom - (value - value_min) / range * lane_height;

    let polyline: Vec<Point> = visible
        .iter()
        .map(|sample| Point::new(area.mapper.time_to_pixel(sample.t), y_of(sample.y)))
        .collect();
    let first_x = polyline.first().map_or(area.inner_left, |point| point.x);
    let last_x = polyline.last().map_or(area.inner_right, |point| point.x);
    let mut fill_path = Vec::with_capacity(polyline.len() + 2);
    fill_path.push(Point::new(first_x, lane_bottom));
    fill_path.extend_from_slice(&polyline);
    fill_path.push(Point::new(last_x, lane_bottom));

    let gap_rects = gaps
        .iter()
        .filter(|gap| area.is_visible(gap.start, gap.end))
        .map(|gap| {
            let x0 = area.x_of(gap.start);
            let x1 = area.x_of(gap.end);
            Rect::new(x0, lane_top, GAP_MIN_WIDTH_PX.max(x1 - x0), lane_height)
        })
        .collect();

    Some(GaugeTrace {
        lane: Rect::new(
            area.inner_left,
            lane_top,
            area.inner_right - area.inner_left,
            lane_height,
        ),
        value_min,
        value_max,
        polyline,
        fill_path,
        stroke: style.gauge_stroke,
        stroke_width: GAUGE_STROKE_WIDTH_PX,
        fill: Fill::VerticalGradient {
            top: style.gauge_fill_top,
            bottom: style.gauge_fill_bottom,
        },
        fill_alpha: GAUGE_FILL_ALPHA,
        gaps: gap_rects,
        gap_color: style.muted,
        gap_alpha: GAP_ALPHA,
    })
}
