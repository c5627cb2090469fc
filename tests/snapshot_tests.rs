use timeline_rs::api::{TimelineEngine, TimelineEngineConfig, TimelineSnapshot, ViewNotificationConfig};
use timeline_rs::axis::resolve_axis_modes;
use timeline_rs::core::{
    DataExtent, Row, RowKind, RowLabel, Sample, Span, SpanKind, TimeAxisTimeZone, TimeRange,
    Viewport,
};
use timeline_rs::interaction::{BrushMode, GestureKind, PointerInput, Surface};
use timeline_rs::render::NullRenderer;

const HOUR: f64 = 3_600_000.0;

fn engine() -> TimelineEngine<NullRenderer> {
    let config = TimelineEngineConfig::new(
        Viewport::new(1_140.0, 300.0),
        Viewport::new(1_000.0, 60.0),
        DataExtent::new(0.0, 40.0 * HOUR).expect("extent"),
    )
    .with_initial_view(TimeRange::new(8.0 * HOUR, 16.0 * HOUR))
    .with_notification(ViewNotificationConfig {
        notify_view_changes: true,
        ..ViewNotificationConfig::default()
    })
    .with_time_zone(TimeAxisTimeZone::Utc);
    let rows = vec![
        Row::gauge(
            "zeta",
            RowLabel::new("Flow", ""),
            vec![Sample::new(0.0, 1.0), Sample::new(HOUR, 2.0)],
            Vec::new(),
        ),
        Row::valve(
            "alpha",
            RowLabel::new("Valve A", "SN-9"),
            vec![Span::new(HOUR, 2.0 * HOUR, SpanKind::Nominal)],
        ),
    ];
    TimelineEngine::new(NullRenderer::default(), config, rows).expect("engine init")
}

#[test]
fn snapshot_keeps_rows_in_display_order() {
    let engine = engine();
    let snapshot = engine.snapshot();
    let ids: Vec<&str> = snapshot.rows.keys().map(String::as_str).collect();
    assert_eq!(ids, ["zeta", "alpha"]);
    assert_eq!(snapshot.rows["zeta"].kind, RowKind::Gauge);
    assert_eq!(snapshot.rows["alpha"].y, 60.0);

    let json = engine.snapshot_json_pretty().expect("json");
    let zeta = json.find("\"zeta\"").expect("zeta in json");
    let alpha = json.find("\"alpha\"").expect("alpha in json");
    assert!(zeta < alpha);
}

#[test]
fn snapshot_reports_view_axis_and_brush() {
    let engine = engine();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.view, TimeRange::new(8.0 * HOUR, 16.0 * HOUR));
    assert_eq!(snapshot.data_extent, TimeRange::new(0.0, 40.0 * HOUR));
    assert_eq!(
        snapshot.axis_modes,
        resolve_axis_modes(8.0 * HOUR, 16.0 * HOUR, 1_000.0)
    );
    assert_eq!(snapshot.tick_spec, snapshot.axis_modes.spec);
    assert_eq!((snapshot.brush.x0, snapshot.brush.x1), (200.0, 400.0));
    assert!(snapshot.active_gesture.is_none());
    assert!(snapshot.pending_notification.is_none());
}

#[test]
fn snapshot_captures_live_gesture_and_pending_notification() {
    let mut engine = engine();
    engine.pointer_down(Surface::Minimap, PointerInput::new(5, 300.0, 20.0));
    engine.pointer_move(Surface::Minimap, PointerInput::new(5, 350.0, 20.0));

    let snapshot = engine.snapshot();
    assert_eq!(
        snapshot.active_gesture,
        Some(GestureKind::Brush(BrushMode::Move))
    );
    let pending = snapshot.pending_notification.expect("pending notification");
    assert_eq!(pending.view, snapshot.view);

    let json = engine.snapshot_json_pretty().expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse snapshot");
    assert_eq!(parsed["active_gesture"]["kind"], "brush");
    assert_eq!(parsed["active_gesture"]["mode"], "move");
    assert_eq!(parsed["rows"]["alpha"]["kind"], "valve");

    let typed: TimelineSnapshot = serde_json::from_str(&json).expect("typed snapshot");
    assert_eq!(typed.rows, snapshot.rows);
    assert_eq!(typed.active_gesture, snapshot.active_gesture);
}
