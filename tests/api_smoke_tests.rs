use timeline_rs::api::{SetViewOptions, TimelineEngine, TimelineEngineConfig};
use timeline_rs::core::{
    DataExtent, MIN_SPAN_MS, PeriodAnchor, PeriodPreset, Row, RowLabel, Sample, Span, SpanKind,
    TimeAxisTimeZone, TimeRange, Viewport,
};
use timeline_rs::interaction::{CaptureRequest, PointerInput, Surface};
use timeline_rs::render::NullRenderer;

const HOUR: f64 = 3_600_000.0;
const DAY: f64 = 24.0 * HOUR;

fn sample_rows() -> Vec<Row> {
    vec![
        Row::valve(
            "v-1",
            RowLabel::new("Inlet", "SN-001"),
            vec![
                Span::new(2.0 * HOUR, 5.0 * HOUR, SpanKind::Confirmed),
                Span::new(6.0 * HOUR, 7.0 * HOUR, SpanKind::Missing),
            ],
        ),
        Row::gauge(
            "g-1",
            RowLabel::new("Pressure", ""),
            (0..48_i32)
                .map(|i| Sample::new(f64::from(i) * HOUR / 2.0, f64::from(i % 7)))
                .collect(),
            vec![TimeRange::new(10.0 * HOUR, 11.0 * HOUR)],
        ),
    ]
}

fn engine_with(extent: DataExtent) -> TimelineEngine<NullRenderer> {
    let config = TimelineEngineConfig::new(
        Viewport::new(1_140.0, 300.0),
        Viewport::new(1_000.0, 60.0),
        extent,
    )
    .with_time_zone(TimeAxisTimeZone::Utc);
    TimelineEngine::new(NullRenderer::default(), config, sample_rows()).expect("engine init")
}

#[test]
fn engine_smoke_flow() {
    let extent = DataExtent::new(0.0, DAY).expect("extent");
    let mut engine = engine_with(extent);
    assert_eq!(engine.renderer().frames_rendered, 1);
    assert_eq!(engine.renderer().last_row_count, 2);

    let view = engine.set_view(
        TimeRange::new(4.0 * HOUR, 8.0 * HOUR),
        SetViewOptions::default(),
    );
    assert_eq!((view.start(), view.end()), (4.0 * HOUR, 8.0 * HOUR));
    assert_eq!(engine.renderer().frames_rendered, 2);

    engine.zoom_in();
    engine.shift_by_fraction(0.25);
    engine.reset_view_to_extent();
    assert_eq!(engine.state().view.as_range(), extent.as_range());

    engine.reset_rows(Vec::new());
    assert!(engine.rows().is_empty());
    assert_eq!(engine.renderer().last_row_count, 0);
    assert_eq!(engine.renderer().frames_rendered, 6);
}

#[test]
fn setting_current_view_is_a_no_op() {
    let extent = DataExtent::new(0.0, 10.0 * DAY).expect("extent");
    let mut engine = engine_with(extent);
    let first = engine.set_view(TimeRange::new(DAY, 3.5 * DAY), SetViewOptions::default());
    let second = engine.set_view(engine.state().view.as_range(), SetViewOptions::default());
    assert_eq!(first, second);
}

#[test]
fn fifteen_minute_extent_pins_the_view() {
    let extent = DataExtent::new(0.0, 900_000.0).expect("extent");
    let mut engine = engine_with(extent);
    for proposed in [
        TimeRange::new(0.0, 900_000.0),
        TimeRange::new(100_000.0, 200_000.0),
        TimeRange::new(-5_000_000.0, 5_000_000.0),
        TimeRange::new(800_000.0, 100.0),
    ] {
        let view = engine.set_view(proposed, SetViewOptions::default());
        assert_eq!((view.start(), view.end()), (0.0, 900_000.0));
    }
}

#[test]
fn zoom_around_pixel_keeps_anchor_time() {
    let extent = DataExtent::new(0.0, 1_000_000_000.0).expect("extent");
    let mut engine = engine_with(extent);
    let view = engine.zoom_around_pixel(0.5, 500.0, 1_000.0);
    assert_eq!(view.span(), 500_000_000.0);
    let anchor = view.start() + view.span() * 0.5;
    assert!((anchor - 500_000_000.0).abs() <= 1e-6);
}

#[test]
fn extent_change_reclamps_view() {
    let extent = DataExtent::new(0.0, 10.0 * DAY).expect("extent");
    let mut engine = engine_with(extent);
    engine.set_view(TimeRange::new(8.0 * DAY, 10.0 * DAY), SetViewOptions::default());
    let view = engine.set_data_extent(DataExtent::new(0.0, 5.0 * DAY).expect("extent"));
    assert_eq!((view.start(), view.end()), (3.0 * DAY, 5.0 * DAY));
    assert!(view.span() >= MIN_SPAN_MS);
}

#[test]
fn load_period_replaces_extent_and_shows_it_whole() {
    let extent = DataExtent::new(0.0, 30.0 * DAY).expect("extent");
    let mut engine = engine_with(extent);
    let view = engine
        .load_period(
            20.0 * DAY + 12.0 * HOUR,
            PeriodPreset::new(6.0 * HOUR, PeriodAnchor::End),
            Some(extent),
        )
        .expect("period");
    assert_eq!(view.start(), 20.0 * DAY + 6.0 * HOUR);
    assert_eq!(view.end(), 20.0 * DAY + 12.0 * HOUR);
    assert_eq!(engine.data_extent().as_range(), view.as_range());

    let bad = engine.load_period(0.0, PeriodPreset::new(-1.0, PeriodAnchor::Start), None);
    assert!(bad.is_err());
    assert_eq!(engine.view(), view);
}

#[test]
fn resize_validates_and_rerenders() {
    let extent = DataExtent::new(0.0, DAY).expect("extent");
    let mut engine = engine_with(extent);
    engine
        .resize(Viewport::new(800.0, 200.0), Viewport::new(700.0, 40.0))
        .expect("resize");
    assert_eq!(engine.inner_width(), 660.0);
    assert_eq!(engine.renderer().frames_rendered, 2);
    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.minimap.viewport.width, 700.0);

    assert!(
        engine
            .resize(Viewport::new(f64::NAN, 200.0), Viewport::new(700.0, 40.0))
            .is_err()
    );
    assert_eq!(engine.timeline_viewport().width, 800.0);
}

#[test]
fn destroy_is_idempotent_and_freezes_state() {
    let extent = DataExtent::new(0.0, DAY).expect("extent");
    let mut engine = engine_with(extent);
    let down = engine.pointer_down(Surface::Timeline, PointerInput::new(9, 600.0, 100.0));
    assert_eq!(down.capture, CaptureRequest::Capture(9));

    assert_eq!(engine.destroy(), CaptureRequest::Release(9));
    assert!(engine.is_destroyed());
    assert_eq!(engine.destroy(), CaptureRequest::None);

    let frames = engine.renderer().frames_rendered;
    let before = engine.view();
    let after = engine.set_view(TimeRange::new(HOUR, 2.0 * HOUR), SetViewOptions::default());
    assert_eq!(after, before);
    assert_eq!(engine.zoom_in(), before);
    engine.reset_rows(Vec::new());
    assert_eq!(engine.rows().len(), 2);
    assert_eq!(engine.renderer().frames_rendered, frames);
    assert!(engine.interaction_state().gesture().is_idle());
}

#[test]
fn config_loaded_from_json_builds_engine() {
    let config = TimelineEngineConfig::from_json_str(
        r#"{
            "timeline_viewport": {"width": 900, "height": 240},
            "minimap_viewport": {"width": 900, "height": 48},
            "data_extent": {"start": 0, "end": 172800000},
            "initial_view": {"start": 3600000, "end": 7200000},
            "time_zone": "Utc",
            "layout": {"gutter_px": 100, "label_stack": true}
        }"#,
    )
    .expect("config");
    let engine =
        TimelineEngine::new(NullRenderer::default(), config, sample_rows()).expect("engine");
    assert_eq!(engine.view().as_range(), TimeRange::new(HOUR, 2.0 * HOUR));
    assert_eq!(engine.inner_width(), 800.0);
    assert!(engine.layout().label_stack);
}

#[test]
fn rows_from_json_reset_keeps_order_and_rejects_garbage() {
    let extent = DataExtent::new(0.0, DAY).expect("extent");
    let mut engine = engine_with(extent);
    engine
        .reset_rows_from_json(
            r#"[
                {"id": "b", "samples": [{"t": 0, "y": 1}, {"t": 1000, "y": 2}]},
                {"id": "a", "type": "valve", "spans": [{"start": 0, "end": 10, "kind": "nominal"}]}
            ]"#,
        )
        .expect("rows");
    let ids: Vec<&str> = engine.rows().iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);

    assert!(engine.reset_rows_from_json("{not json").is_err());
    assert_eq!(engine.rows().len(), 2);
}
