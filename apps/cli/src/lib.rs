//! SAFE conversion calculator CLI.
//!
//! Reads configuration and scenarios, hands validated numbers to
//! `safecap-core` and renders the results.

pub mod commands;
pub mod config;
pub mod render;
pub mod scenario;

use config::{LogFormat, LogLevel};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Diagnostics go to stderr so stdout only carries command output.
/// `RUST_LOG` wins over the configured level.
pub fn init_tracing(level: LogLevel, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
