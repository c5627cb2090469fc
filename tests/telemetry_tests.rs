use timeline_rs::telemetry::{init_default_tracing, init_tracing_with_fallback_filter};

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_setup_is_a_no_op_without_feature() {
    assert!(!init_default_tracing());
    assert!(!init_tracing_with_fallback_filter("timeline_rs=trace"));
}

#[cfg(feature = "telemetry")]
#[test]
fn tracing_setup_installs_once() {
    let first = init_default_tracing();
    let second = init_tracing_with_fallback_filter("timeline_rs=trace");
    assert!(!(first && second));
}
