//! Logging setup and utilities.
//!
//! Console output always goes to stderr; an optional JSON file layer is added
//! when a log file is configured.

use anyhow::Result;
use std::path::Path;
use tracing::info;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize structured logging system
pub fn init_logging(log_level: Option<&str>, log_file: Option<&Path>) -> Result<()> {
    // RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = log_level.unwrap_or("info");
            EnvFilter::try_new(level)
        })
        .map_err(|e| anyhow::anyhow!("Failed to create log filter: {e}"))?;

    let registry = Registry::default().with(env_filter);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true);

    if let Some(log_path) = log_file {
        let file_appender = rolling::daily(log_path.parent().unwrap_or(Path::new(".")), "app.log");
        let (non_blocking_appender, _guard) = non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_appender)
            .with_ansi(false)
            .with_target(true)
            .json();

        registry.with(console_layer).with(file_layer).init();
    } else {
        registry.with(console_layer).init();
    }

    info!("Logging system initialized");
    Ok(())
}
