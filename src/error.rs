//! Error types for the store boundary and application entry points

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Failures while reading or writing workout records
#[derive(Error, Debug)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("User not found: {0}")]
  UserNotFound(String),

  #[error("Invalid record: {0}")]
  InvalidRecord(String),
}

/// Top-level error returned by commands and the binary
#[derive(Error, Debug)]
pub enum AppError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Store(#[from] StoreError),

  #[error("Serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl AppError {
  /// Stable machine-readable code for the presentation layer
  pub fn code(&self) -> &'static str {
    match self {
      AppError::Config(_) => "config_error",
      AppError::Store(StoreError::UserNotFound(_)) => "user_not_found",
      AppError::Store(StoreError::InvalidRecord(_)) => "invalid_record",
      AppError::Store(_) => "store_error",
      AppError::Serialization(_) => "serialization_error",
    }
  }
}

/// Error payload handed to a UI shell
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  pub error: String,
  pub details: String,
}

impl From<&AppError> for ErrorResponse {
  fn from(err: &AppError) -> Self {
    Self {
      error: err.code().to_string(),
      details: err.to_string(),
    }
  }
}

pub type Result<T> = std::result::Result<T, AppError>;
