//! Opt-in tracing setup for hosts embedding the timeline engine.
//!
//! The engine only emits `tracing` events. Installing a subscriber is left to
//! the host; these helpers cover the common case when the `telemetry` feature
//! is enabled.

/// Filter directive used when `RUST_LOG` is not set.
pub const DEFAULT_TRACING_FILTER: &str = "info,timeline_rs=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback_filter(DEFAULT_TRACING_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback directive,
/// e.g. `"timeline_rs=trace"` to follow every gesture step.
#[must_use]
pub fn init_tracing_with_fallback_filter(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
