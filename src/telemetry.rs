//! Opt-in tracing setup for hosts embedding `layered-chart`.
//!
//! The crate only emits `tracing` events (surface resizes, gated renders,
//! per-pass visible bounds). Installing a subscriber is the host's call;
//! these helpers cover the common case behind the `telemetry` feature.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "layered_chart=info";

/// Installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`,
/// falling back to [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with an explicit fallback directive
/// string such as `"layered_chart::layers=trace"`.
#[must_use]
pub fn init_tracing_with_filter(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directives));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}
