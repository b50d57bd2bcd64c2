//! Structured logging setup for OneSignal client binaries
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary. Logs go to stderr so command output on stdout stays clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines (for development)
    #[default]
    Console,
    /// One JSON object per event (for log shipping)
    Json,
}

/// `RUST_LOG` wins over `default_level` when set.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize logging in the requested format
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(app_name: &str, default_level: &str, format: LogFormat) -> InitResult {
    match format {
        LogFormat::Json => init_json_logging(default_level)?,
        LogFormat::Console => init_console_logging(default_level)?,
    }

    tracing::debug!(app = app_name, format = ?format, "Logging initialized");
    Ok(())
}

fn init_json_logging(default_level: &str) -> InitResult {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

fn init_console_logging(default_level: &str) -> InitResult {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
}
