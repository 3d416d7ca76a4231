//! Tracing setup for binaries and tests that embed the reconciler

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Install a compact stderr subscriber at `info`, unless `RUST_LOG` says
/// otherwise.
pub fn init() -> InitResult {
    init_with_debug(false)
}

/// Like [`init`], with the default level lowered to `debug` when `debug` is
/// set. Pass `ClientConfig::debug` so `TF_LOG` turns on reconciliation
/// traces.
pub fn init_with_debug(debug: bool) -> InitResult {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(if debug { "debug" } else { "info" })?,
    };

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    Ok(())
}
