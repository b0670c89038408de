//----------------------------------------
// Logging setup
//----------------------------------------
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Installs a stderr `tracing` subscriber filtered by the `TRIALPOWER_LOG`
/// environment variable (e.g. `TRIALPOWER_LOG=trialpower=debug`), falling
/// back to `trialpower=info`. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TRIALPOWER_LOG")
            .unwrap_or_else(|_| EnvFilter::new("trialpower=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
