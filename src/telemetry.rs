//! Opt-in tracing setup for applications embedding `minichart`.
//!
//! Layout warnings (clamped font sizes, degenerate axes) and per-pass debug
//! events are emitted through `tracing`. Hosts can call
//! `init_default_tracing` or install their own subscriber.

/// Installs a compact fmt subscriber filtered by `RUST_LOG` (default `info`)
/// when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    #[test]
    fn tracing_init_is_noop_without_feature() {
        assert!(!super::init_default_tracing());
    }
}
