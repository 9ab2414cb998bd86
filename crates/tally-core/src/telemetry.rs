use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset: info everywhere, with the
/// queue's own target at debug so individual record and drain commands
/// show up.
fn default_filter() -> EnvFilter {
    EnvFilter::new("info,tally_core=debug")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter())
}

/// Install the global tracing subscriber for the stats queue.
///
/// - Debug builds: pretty-printed human-readable output
/// - Release builds: JSON-formatted output for log aggregation
///
/// The log level is controlled by the `RUST_LOG` environment variable,
/// falling back to [`default_filter`]. Calling this again after a
/// subscriber is installed is a no-op.
pub fn init_tracing() {
    let filter = env_filter();

    if cfg!(debug_assertions) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init();
    }
}
