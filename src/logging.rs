//! Structured logging via `tracing`
//!
//! The engine only emits events; hosts that want them printed call
//! [`init_tracing`] once. `RUST_LOG` overrides the configured filter.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Default filter: engine warnings (skipped descriptors, unknown items) only
pub const DEFAULT_FILTER: &str = "party_guests_core=warn";

/// Build the filter string for a bare level such as "debug"
pub fn filter_for_level(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        lvl @ ("trace" | "debug" | "info" | "warn" | "error") => {
            format!("party_guests_core={}", lvl)
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Install a compact fmt subscriber (idempotent, first call wins)
pub fn init_tracing(level: Option<&str>) {
    let filter_str = level.map(filter_for_level).unwrap_or_else(|| DEFAULT_FILTER.to_string());
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .compact();

        // Another subscriber may already be installed by the host
        let _ = subscriber.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_level() {
        assert_eq!(filter_for_level("DEBUG"), "party_guests_core=debug");
        assert_eq!(filter_for_level(" warn "), "party_guests_core=warn");
        assert_eq!(filter_for_level("loud"), DEFAULT_FILTER);
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing(Some("debug"));
        init_tracing(None);
    }
}
