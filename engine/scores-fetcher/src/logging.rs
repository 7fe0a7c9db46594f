//! Logging and tracing setup

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, prelude::*, util::SubscriberInitExt, EnvFilter};

/// Initialize logging
///
/// `RUST_LOG` takes precedence over `level`. `format` is one of `json`,
/// `pretty` or anything else for the compact default.
pub fn initialize_logging(level: &str, format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let fmt_layer = match format {
        "json" => fmt::layer().json().with_target(true).with_file(true).with_line_number(true).boxed(),
        "pretty" => fmt::layer().pretty().with_target(false).with_ansi(true).boxed(),
        _ => fmt::layer().compact().with_target(false).with_ansi(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
