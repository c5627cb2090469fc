use approx::assert_abs_diff_eq;
use timeline_rs::api::{TimelineEngine, TimelineEngineConfig};
use timeline_rs::core::{DataExtent, TimeAxisTimeZone, TimeRange, Viewport};
use timeline_rs::interaction::{
    BrushMode, BrushPixels, CaptureRequest, CursorHint, GestureKind, InteractionConfig,
    PointerInput, Surface, WheelInput,
};
use timeline_rs::render::NullRenderer;

fn engine() -> TimelineEngine<NullRenderer> {
    engine_with(InteractionConfig::default())
}

fn engine_with(interaction: InteractionConfig) -> TimelineEngine<NullRenderer> {
    let config = TimelineEngineConfig::new(
        Viewport::new(1_140.0, 300.0),
        Viewport::new(1_000.0, 60.0),
        DataExtent::new(0.0, 10_000_000.0).expect("extent"),
    )
    .with_initial_view(TimeRange::new(2_000_000.0, 4_000_000.0))
    .with_interaction(interaction)
    .with_time_zone(TimeAxisTimeZone::Utc);
    TimelineEngine::new(NullRenderer::default(), config, Vec::new()).expect("engine init")
}

fn at(x: f64) -> PointerInput {
    PointerInput::new(1, x, 30.0)
}

fn assert_view(engine: &TimelineEngine<NullRenderer>, start: f64, end: f64) {
    let view = engine.view();
    assert_abs_diff_eq!(view.start(), start, epsilon = 1e-6);
    assert_abs_diff_eq!(view.end(), end, epsilon = 1e-6);
}

#[test]
fn brush_projects_view_onto_minimap() {
    let engine = engine();
    assert_eq!(engine.brush_pixels(), BrushPixels { x0: 200.0, x1: 400.0 });
}

#[test]
fn pointer_down_resolves_mode_by_priority() {
    for (x, mode) in [
        (197.0, BrushMode::Left),
        (300.0, BrushMode::Move),
        (406.0, BrushMode::Right),
        (420.0, BrushMode::Create),
    ] {
        let mut engine = engine();
        let response = engine.pointer_down(Surface::Minimap, at(x));
        assert!(response.handled);
        assert_eq!(response.capture, CaptureRequest::Capture(1));
        assert_eq!(engine.snapshot().active_gesture, Some(GestureKind::Brush(mode)));
    }
}

#[test]
fn left_resize_keeps_right_edge() {
    let mut engine = engine();
    engine.pointer_down(Surface::Minimap, at(198.0));
    engine.pointer_move(Surface::Minimap, at(100.0));
    assert_view(&engine, 1_000_000.0, 4_000_000.0);

    // Past the right edge the brush stops at its minimum width; the view then
    // grows forward to the minimum span.
    engine.pointer_move(Surface::Minimap, at(800.0));
    assert_view(&engine, 3_900_000.0, 4_800_000.0);
}

#[test]
fn move_stays_flush_with_minimap_edges() {
    let mut engine = engine();
    engine.pointer_down(Surface::Minimap, at(300.0));
    engine.pointer_move(Surface::Minimap, at(1_200.0));
    assert_view(&engine, 8_000_000.0, 10_000_000.0);
    engine.pointer_move(Surface::Minimap, at(-500.0));
    assert_view(&engine, 0.0, 2_000_000.0);
}

#[test]
fn create_commits_on_press_and_grows_to_release() {
    let mut engine = engine();
    let down = engine.pointer_down(Surface::Minimap, at(700.0));
    // 10px minimum brush, then widened to the minimum view span.
    assert_abs_diff_eq!(down.view.start(), 7_000_000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(down.view.span(), 900_000.0, epsilon = 1e-6);
    assert_eq!(down.cursor, CursorHint::Crosshair);

    engine.pointer_move(Surface::Minimap, at(900.0));
    assert_view(&engine, 7_000_000.0, 9_000_000.0);
    engine.pointer_move(Surface::Minimap, at(500.0));
    assert_view(&engine, 5_000_000.0, 7_000_000.0);

    let up = engine.pointer_up(Surface::Minimap, at(500.0));
    assert_eq!(up.capture, CaptureRequest::Release(1));
    assert_eq!(up.cursor, CursorHint::Default);
    assert!(engine.snapshot().active_gesture.is_none());
}

#[test]
fn replaying_moves_depends_only_on_last_position() {
    let mut direct = engine();
    direct.pointer_down(Surface::Minimap, at(300.0));
    direct.pointer_move(Surface::Minimap, at(450.0));

    let mut jittery = engine();
    jittery.pointer_down(Surface::Minimap, at(300.0));
    for x in [310.0, 280.0, 900.0, 0.0, 451.0, 450.0] {
        jittery.pointer_move(Surface::Minimap, at(x));
    }
    assert_eq!(direct.view(), jittery.view());
}

#[test]
fn hover_updates_cursor_without_changing_view() {
    let mut engine = engine();
    let before = engine.view();
    for (x, cursor) in [
        (205.0, CursorHint::ResizeHorizontal),
        (300.0, CursorHint::Grab),
        (600.0, CursorHint::Crosshair),
    ] {
        let response = engine.pointer_move(Surface::Minimap, at(x));
        assert!(!response.handled);
        assert_eq!(response.cursor, cursor);
    }
    let leave = engine.pointer_leave(Surface::Minimap, at(600.0));
    assert_eq!(leave.cursor, CursorHint::Default);
    assert_eq!(engine.view(), before);
}

#[test]
fn leave_and_cancel_end_the_gesture_without_further_commits() {
    let mut engine = engine();
    engine.pointer_down(Surface::Minimap, at(300.0));
    engine.pointer_move(Surface::Minimap, at(350.0));
    let committed = engine.view();

    let leave = engine.pointer_leave(Surface::Minimap, at(350.0));
    assert_eq!(leave.capture, CaptureRequest::Release(1));
    engine.pointer_move(Surface::Minimap, at(600.0));
    assert_eq!(engine.view(), committed);

    engine.pointer_down(Surface::Minimap, at(300.0));
    let cancel = engine.pointer_cancel(Surface::Minimap, at(300.0));
    assert_eq!(cancel.capture, CaptureRequest::Release(1));
    assert!(engine.interaction_state().gesture().is_idle());
}

#[test]
fn foreign_pointer_cannot_steal_or_end_gesture() {
    let mut engine = engine();
    engine.pointer_down(Surface::Minimap, at(300.0));
    let second = engine.pointer_down(Surface::Minimap, PointerInput::new(2, 700.0, 30.0));
    assert!(!second.handled);
    let wrong_up = engine.pointer_up(Surface::Minimap, PointerInput::new(2, 700.0, 30.0));
    assert!(!wrong_up.handled);
    assert_eq!(engine.interaction_state().gesture().pointer_id(), Some(1));

    let wheel = engine.wheel(Surface::Timeline, WheelInput::vertical(640.0, 100.0));
    assert!(!wheel.handled);
}

#[test]
fn disabled_brush_ignores_minimap_input() {
    let mut engine = engine_with(InteractionConfig {
        minimap_brush_enabled: false,
        ..InteractionConfig::default()
    });
    let before = engine.view();
    let down = engine.pointer_down(Surface::Minimap, at(700.0));
    assert!(!down.handled);
    assert_eq!(down.capture, CaptureRequest::None);
    assert_eq!(engine.view(), before);
}
