//! SQLite record store.
//!
//! This is the boundary between persisted rows and the aggregation layer: it
//! writes users, exercises, workouts and entries, and reads them back as a
//! typed [`WorkoutSnapshot`] for one user.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::error::StoreError;
use crate::models::{EntryRow, ExerciseRow, User, WorkoutRow, WorkoutSnapshot};

pub type DbPool = SqlitePool;

/// Application state holding the database connection pool
pub struct AppState {
  pub db: DbPool,
  pub config: Config,
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(config: &Config) -> Result<DbPool, StoreError> {
  tracing::info!(url = %config.database_url, "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(config.max_connections)
    .connect(&config.database_url)
    .await?;

  run_migrations(&pool).await?;

  tracing::info!("Database initialized successfully");

  Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), StoreError> {
  sqlx::migrate!("./migrations").run(pool).await?;
  Ok(())
}

/// ---------------------------------------------------------------------------
/// Writes
/// ---------------------------------------------------------------------------

pub async fn create_user(pool: &DbPool, username: &str) -> Result<i64, StoreError> {
  let username = username.trim();
  if username.is_empty() {
    return Err(StoreError::InvalidRecord("username must not be empty".to_string()));
  }

  let result = sqlx::query("INSERT INTO users (username) VALUES (?1)")
    .bind(username)
    .execute(pool)
    .await?;

  Ok(result.last_insert_rowid())
}

pub async fn find_user_by_username(pool: &DbPool, username: &str) -> Result<Option<User>, StoreError> {
  let user = sqlx::query_as::<_, User>(
    "SELECT id, username, created_at FROM users WHERE username = ?1",
  )
  .bind(username.trim())
  .fetch_optional(pool)
  .await?;

  Ok(user)
}

/// The earliest registered user, for single-user setups
pub async fn first_user(pool: &DbPool) -> Result<Option<User>, StoreError> {
  let user = sqlx::query_as::<_, User>("SELECT id, username, created_at FROM users ORDER BY id LIMIT 1")
    .fetch_optional(pool)
    .await?;

  Ok(user)
}

/// Look up a user by name, failing with `UserNotFound` if absent
pub async fn require_user(pool: &DbPool, username: &str) -> Result<User, StoreError> {
  find_user_by_username(pool, username)
    .await?
    .ok_or_else(|| StoreError::UserNotFound(username.to_string()))
}

pub async fn create_exercise(
  pool: &DbPool,
  user_id: i64,
  name: &str,
  category: &str,
) -> Result<i64, StoreError> {
  let result = sqlx::query(
    "INSERT INTO exercises (user_id, name, category) VALUES (?1, ?2, ?3)",
  )
  .bind(user_id)
  .bind(name)
  .bind(category)
  .execute(pool)
  .await?;

  Ok(result.last_insert_rowid())
}

pub async fn list_exercises(pool: &DbPool, user_id: i64) -> Result<Vec<ExerciseRow>, StoreError> {
  let rows = sqlx::query_as::<_, ExerciseRow>(
    "SELECT id, user_id, name, category, created_at FROM exercises WHERE user_id = ?1 ORDER BY name",
  )
  .bind(user_id)
  .fetch_all(pool)
  .await?;

  Ok(rows)
}

/// Delete an exercise; its entries stay behind with a NULL exercise reference
pub async fn delete_exercise(pool: &DbPool, exercise_id: i64) -> Result<(), StoreError> {
  sqlx::query("DELETE FROM exercises WHERE id = ?1")
    .bind(exercise_id)
    .execute(pool)
    .await?;
  Ok(())
}

pub async fn create_workout(
  pool: &DbPool,
  user_id: i64,
  date: Option<NaiveDateTime>,
  notes: Option<&str>,
) -> Result<i64, StoreError> {
  let result = sqlx::query("INSERT INTO workouts (user_id, date, notes) VALUES (?1, ?2, ?3)")
    .bind(user_id)
    .bind(date)
    .bind(notes)
    .execute(pool)
    .await?;

  Ok(result.last_insert_rowid())
}

/// For inserting new entries (without id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkoutEntry {
  pub exercise_id: i64,
  pub sets: u32,
  pub reps: u32,
  pub weight: f64,
  pub comment: Option<String>,
}

pub async fn add_workout_entry(
  pool: &DbPool,
  workout_id: i64,
  entry: &NewWorkoutEntry,
) -> Result<i64, StoreError> {
  if entry.sets < 1 || entry.reps < 1 {
    return Err(StoreError::InvalidRecord(format!(
      "sets and reps must be at least 1 (got {}x{})",
      entry.sets, entry.reps
    )));
  }
  if !entry.weight.is_finite() || entry.weight < 0.0 {
    return Err(StoreError::InvalidRecord(format!("weight must be non-negative (got {})", entry.weight)));
  }

  let result = sqlx::query(
    r#"
    INSERT INTO workout_entries (workout_id, exercise_id, sets, reps, weight, comment)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
  )
  .bind(workout_id)
  .bind(entry.exercise_id)
  .bind(entry.sets as i64)
  .bind(entry.reps as i64)
  .bind(entry.weight)
  .bind(entry.comment.as_deref())
  .execute(pool)
  .await?;

  Ok(result.last_insert_rowid())
}

/// ---------------------------------------------------------------------------
/// Snapshot Reads
/// ---------------------------------------------------------------------------

/// Optional half-open `[from, to)` bound on workout dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
  pub from: Option<NaiveDateTime>,
  pub to: Option<NaiveDateTime>,
}

/// Load every workout of `user_id` (optionally date-bounded) with entries resolved
pub async fn load_snapshot(
  pool: &DbPool,
  user_id: i64,
  range: DateRange,
) -> Result<WorkoutSnapshot, StoreError> {
  let workouts = sqlx::query_as::<_, WorkoutRow>(
    r#"
    SELECT id, user_id, date, notes
    FROM workouts
    WHERE user_id = ?1
      AND (?2 IS NULL OR date >= ?2)
      AND (?3 IS NULL OR date < ?3)
    ORDER BY date, id
    "#,
  )
  .bind(user_id)
  .bind(range.from)
  .bind(range.to)
  .fetch_all(pool)
  .await?;

  let entries = sqlx::query_as::<_, EntryRow>(
    r#"
    SELECT
      we.id, we.workout_id,
      e.id AS exercise_id, e.name AS exercise_name, e.category AS exercise_category,
      we.sets, we.reps, CAST(we.weight AS REAL) AS weight, we.comment
    FROM workout_entries we
    JOIN workouts w ON w.id = we.workout_id
    LEFT JOIN exercises e ON e.id = we.exercise_id
    WHERE w.user_id = ?1
      AND (?2 IS NULL OR w.date >= ?2)
      AND (?3 IS NULL OR w.date < ?3)
    ORDER BY we.id
    "#,
  )
  .bind(user_id)
  .bind(range.from)
  .bind(range.to)
  .fetch_all(pool)
  .await?;

  tracing::debug!(
    user_id,
    workouts = workouts.len(),
    entries = entries.len(),
    "Loaded workout rows"
  );

  Ok(WorkoutSnapshot::from_rows(user_id, workouts, entries))
}
