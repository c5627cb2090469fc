use std::cell::RefCell;
use std::rc::Rc;

use timeline_rs::api::{SetViewOptions, TimelineEngine, TimelineEngineConfig};
use timeline_rs::core::{
    DataExtent, Row, RowLabel, Span, SpanKind, TimeAxisTimeZone, TimeRange, Viewport,
};
use timeline_rs::extensions::{TimelineContext, TimelineEvent, TimelinePlugin};
use timeline_rs::interaction::{GestureKind, PointerInput, Surface};
use timeline_rs::render::NullRenderer;

const HOUR: f64 = 3_600_000.0;

type Log = Rc<RefCell<Vec<(TimelineEvent, TimelineContext)>>>;

struct RecordingPlugin {
    id: String,
    log: Log,
}

impl RecordingPlugin {
    fn new(id: &str) -> (Self, Log) {
        let log = Log::default();
        (
            Self {
                id: id.to_owned(),
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl TimelinePlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: TimelineEvent, context: TimelineContext) {
        self.log.borrow_mut().push((event, context));
    }
}

fn events(log: &Log) -> Vec<TimelineEvent> {
    log.borrow_mut().drain(..).map(|(event, _)| event).collect()
}

fn engine() -> TimelineEngine<NullRenderer> {
    let config = TimelineEngineConfig::new(
        Viewport::new(1_140.0, 300.0),
        Viewport::new(1_000.0, 60.0),
        DataExtent::new(0.0, 100.0 * HOUR).expect("extent"),
    )
    .with_initial_view(TimeRange::new(10.0 * HOUR, 20.0 * HOUR))
    .with_time_zone(TimeAxisTimeZone::Utc);
    let rows = vec![Row::valve(
        "v-1",
        RowLabel::new("Inlet", "SN-1"),
        vec![Span::new(11.0 * HOUR, 12.0 * HOUR, SpanKind::Confirmed)],
    )];
    TimelineEngine::new(NullRenderer::default(), config, rows).expect("engine init")
}

#[test]
fn registration_rejects_empty_and_duplicate_ids() {
    let mut engine = engine();
    let (empty, _) = RecordingPlugin::new("");
    assert!(engine.register_plugin(Box::new(empty)).is_err());

    let (first, _) = RecordingPlugin::new("audit");
    engine.register_plugin(Box::new(first)).expect("first plugin");
    let (second, _) = RecordingPlugin::new("audit");
    let err = engine
        .register_plugin(Box::new(second))
        .expect_err("duplicate id");
    assert!(err.to_string().contains("audit"));
    assert_eq!(engine.plugin_count(), 1);
    assert!(engine.has_plugin("audit"));

    assert!(engine.unregister_plugin("audit"));
    assert!(!engine.unregister_plugin("audit"));
    assert_eq!(engine.plugin_count(), 0);
}

#[test]
fn view_changes_and_renders_are_reported_in_order() {
    let mut engine = engine();
    let (plugin, log) = RecordingPlugin::new("audit");
    engine.register_plugin(Box::new(plugin)).expect("plugin");

    engine.set_view(TimeRange::new(12.0 * HOUR, 18.0 * HOUR), SetViewOptions::default());
    assert_eq!(
        events(&log),
        [
            TimelineEvent::ViewChanged {
                start: 12.0 * HOUR,
                end: 18.0 * HOUR,
            },
            TimelineEvent::Rendered,
        ]
    );

    engine.set_view(TimeRange::new(12.0 * HOUR, 18.0 * HOUR), SetViewOptions::default());
    assert_eq!(events(&log), [TimelineEvent::Rendered]);
}

#[test]
fn data_replacement_reports_row_and_extent_events() {
    let mut engine = engine();
    let (plugin, log) = RecordingPlugin::new("audit");
    engine.register_plugin(Box::new(plugin)).expect("plugin");

    engine.reset_rows(Vec::new());
    assert_eq!(
        events(&log),
        [
            TimelineEvent::RowsReset { rows_len: 0 },
            TimelineEvent::Rendered,
        ]
    );

    engine.set_data_extent(DataExtent::new(0.0, 15.0 * HOUR).expect("extent"));
    assert_eq!(
        events(&log),
        [
            TimelineEvent::ExtentChanged {
                start: 0.0,
                end: 15.0 * HOUR,
            },
            TimelineEvent::ViewChanged {
                start: 5.0 * HOUR,
                end: 15.0 * HOUR,
            },
            TimelineEvent::Rendered,
        ]
    );
}

#[test]
fn pan_gesture_is_bracketed_by_start_and_end_events() {
    let mut engine = engine();
    let (plugin, log) = RecordingPlugin::new("audit");
    engine.register_plugin(Box::new(plugin)).expect("plugin");

    engine.pointer_down(Surface::Timeline, PointerInput::new(3, 500.0, 100.0));
    engine.pointer_move(Surface::Timeline, PointerInput::new(3, 600.0, 100.0));
    engine.pointer_up(Surface::Timeline, PointerInput::new(3, 600.0, 100.0));

    let recorded = log.borrow();
    let kinds: Vec<TimelineEvent> = recorded.iter().map(|(event, _)| *event).collect();
    assert_eq!(kinds.len(), 4);
    assert_eq!(
        kinds[0],
        TimelineEvent::GestureStarted {
            kind: GestureKind::Pan
        }
    );
    assert!(matches!(kinds[1], TimelineEvent::ViewChanged { .. }));
    assert_eq!(kinds[2], TimelineEvent::Rendered);
    assert_eq!(
        kinds[3],
        TimelineEvent::GestureEnded {
            kind: GestureKind::Pan
        }
    );

    // The context is read while the gesture is still alive.
    assert_eq!(recorded[1].1.active_gesture, Some(GestureKind::Pan));
    assert_eq!(recorded[1].1.rows_len, 1);
    assert_eq!(recorded[3].1.active_gesture, None);
}

#[test]
fn destroy_drops_plugins() {
    let mut engine = engine();
    let (plugin, log) = RecordingPlugin::new("audit");
    engine.register_plugin(Box::new(plugin)).expect("plugin");
    engine.destroy();
    assert_eq!(engine.plugin_count(), 0);
    engine.zoom_in();
    assert!(events(&log).is_empty());
}
