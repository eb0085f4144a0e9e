//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(config: &Config) {
  let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

  let result = match config.log_format {
    LogFormat::Json => tracing_subscriber::registry()
      .with(filter)
      .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
      .try_init(),
    LogFormat::Pretty => tracing_subscriber::registry()
      .with(filter)
      .with(tracing_subscriber::fmt::layer().with_target(false))
      .try_init(),
  };

  if result.is_ok() {
    tracing::debug!(level = %config.log_level, format = ?config.log_format, "Logging initialized");
  }
}
