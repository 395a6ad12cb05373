use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "microwave_lib=debug,microwave=debug,warn";

/// Initialize logging with tracing
///
/// This function sets up the tracing subscriber with the following configuration:
/// - Reads filter from RUST_LOG environment variable if available
/// - Falls back to [`DEFAULT_FILTER`] if RUST_LOG is not set
/// - Uses a formatted output layer on stderr, leaving stdout to the console
///
/// Calling it again after a subscriber is installed is a no-op.
///
/// # Example
///
/// ```no_run
/// use microwave_lib::utils::logging::init_logging;
///
/// init_logging();
/// ```
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Microwave logging initialized");
    }
}
