//! Installs the process-wide `tracing` subscriber.
//!
//! The filter is read from `RUST_LOG`, for example:
//! ```bash
//! RUST_LOG=snapline=debug,info
//! ```
//!
//! Records emitted through the `log` facade by the library are forwarded
//! into the same subscriber.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the tracer, using tracing subscription.
///
/// With `debug`, everything at `DEBUG` and above is shown regardless of
/// the environment. Otherwise, `RUST_LOG` applies, falling back to `INFO`.
pub fn initialize_tracer(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let fmt_layer = tracing_subscriber::fmt::layer().compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
