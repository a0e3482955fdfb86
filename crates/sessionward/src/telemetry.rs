//! Logging setup.
//!
//! Sessionward logs through `tracing`. Libraries shouldn't install a
//! global subscriber on their own, so this is opt-in for binaries that
//! don't already have one.

use tracing_subscriber::EnvFilter;

/// Installs a formatted `tracing` subscriber.
///
/// The filter comes from the `RUST_LOG` environment variable, falling back
/// to `default_directive` (e.g. `"info"` or `"sessionward_session=debug"`).
/// Calling this more than once, or after another subscriber was installed,
/// is harmless: later calls are ignored.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
