//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://gym-log.db?mode=rwc";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value}")]
  Invalid { key: &'static str, value: String },
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

impl std::str::FromStr for LogFormat {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "pretty" | "text" => Ok(Self::Pretty),
      "json" => Ok(Self::Json),
      _ => Err(format!("Unknown log format: {}", s)),
    }
  }
}

#[derive(Debug, Clone)]
pub struct Config {
  /// SQLite connection string
  pub database_url: String,
  /// `EnvFilter` directive, e.g. `info` or `gym_log_lib=debug`
  pub log_level: String,
  pub log_format: LogFormat,
  pub max_connections: u32,
  /// Username the binary reports on
  pub user: Option<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      log_level: DEFAULT_LOG_LEVEL.to_string(),
      log_format: LogFormat::Pretty,
      max_connections: DEFAULT_MAX_CONNECTIONS,
      user: None,
    }
  }
}

impl Config {
  /// Load configuration from the environment, falling back to defaults
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();

    let defaults = Self::default();

    let max_connections = match env::var("GYMLOG_MAX_CONNECTIONS") {
      Ok(raw) => match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
          return Err(ConfigError::Invalid {
            key: "GYMLOG_MAX_CONNECTIONS",
            value: raw,
          })
        }
      },
      Err(_) => defaults.max_connections,
    };

    let log_format = match env::var("GYMLOG_LOG_FORMAT") {
      Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
        key: "GYMLOG_LOG_FORMAT",
        value: raw.clone(),
      })?,
      Err(_) => defaults.log_format,
    };

    Ok(Self {
      database_url: env::var("GYMLOG_DATABASE_URL").unwrap_or(defaults.database_url),
      log_level: env::var("GYMLOG_LOG_LEVEL").unwrap_or(defaults.log_level),
      log_format,
      max_connections,
      user: env::var("GYMLOG_USER")
        .ok()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty()),
    })
  }
}
