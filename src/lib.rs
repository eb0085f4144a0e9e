pub mod achievements;
pub mod assistant;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod period;
pub mod stats;
pub mod views;

#[cfg(test)]
mod test_utils;

use config::{Config, ConfigError};
use db::AppState;
use error::{Result, StoreError};
use period::Period;

/// Load configuration, install logging and open the store
pub async fn bootstrap() -> Result<AppState> {
  let config = Config::from_env()?;
  logging::init(&config);

  let pool = db::initialize_db(&config).await?;
  Ok(AppState { db: pool, config })
}

/// Resolve the configured user, falling back to the first registered one
async fn report_user(state: &AppState) -> Result<i64> {
  match state.config.user.as_deref() {
    Some(username) => commands::resolve_user(state, username).await,
    None => {
      let user = db::first_user(&state.db)
        .await?
        .ok_or_else(|| StoreError::UserNotFound("no users registered".to_string()))?;
      Ok(user.id)
    }
  }
}

/// Print the progress report for `period` as JSON on stdout
pub async fn run(period: Option<&str>) -> Result<()> {
  let state = bootstrap().await?;

  let period = match period {
    Some(raw) => raw.parse::<Period>().map_err(|_| ConfigError::Invalid {
      key: "period",
      value: raw.to_string(),
    })?,
    None => Period::default(),
  };

  let user_id = report_user(&state).await?;
  let now = chrono::Local::now().naive_local();

  let report = commands::progress::get_progress_report(&state, user_id, period, now).await?;
  println!("{}", serde_json::to_string_pretty(&report)?);

  state.db.close().await;
  Ok(())
}
