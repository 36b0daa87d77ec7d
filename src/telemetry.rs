//! Telemetry helpers for hosts embedding the widgets.
//!
//! Every adapter logs through `tracing`; nothing is printed unless the host
//! installs a subscriber, either its own or the one built here.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`
/// (falling back to `info`) when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or another global subscriber
/// is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
