//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seeded users, exercises and workouts
//! - In-memory record factories
//! - Helper assertions

use chrono::{Days, NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::{self, AppState, NewWorkoutEntry};
use crate::models::{Category, Exercise, Workout, WorkoutEntry};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  db::run_migrations(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Wrap a test pool in application state with default config
pub fn test_state(pool: SqlitePool) -> AppState {
  AppState {
    db: pool,
    config: Config::default(),
  }
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

pub async fn seed_test_user(pool: &SqlitePool, username: &str) -> i64 {
  db::create_user(pool, username)
    .await
    .expect("Failed to seed user")
}

/// Ids of the exercises created by [`seed_test_exercises`]
#[derive(Debug, Clone, Copy)]
pub struct TestExercises {
  pub bench_press: i64,
  pub squat: i64,
  pub deadlift: i64,
  pub running: i64,
}

/// Seed a small exercise library, with categories stored the way the app stores them
pub async fn seed_test_exercises(pool: &SqlitePool, user_id: i64) -> TestExercises {
  let mut ids = Vec::new();
  for (name, category) in [
    ("Bench Press", "Грудь"),
    ("Squat", "Ноги"),
    ("Deadlift", "Спина"),
    ("Running", "Кардио"),
  ] {
    let id = db::create_exercise(pool, user_id, name, category)
      .await
      .expect("Failed to seed exercise");
    ids.push(id);
  }

  TestExercises {
    bench_press: ids[0],
    squat: ids[1],
    deadlift: ids[2],
    running: ids[3],
  }
}

/// Seed one workout per entry in `days_ago`, each with a bench press 3×10×80
/// and a 30 minute run. Returns the workout ids.
pub async fn seed_test_workouts(
  pool: &SqlitePool,
  user_id: i64,
  exercises: &TestExercises,
  now: NaiveDateTime,
  days_ago: &[u64],
) -> Vec<i64> {
  let mut workout_ids = Vec::new();

  for &offset in days_ago {
    let date = now
      .checked_sub_days(Days::new(offset))
      .expect("date in range");
    let workout_id = db::create_workout(pool, user_id, Some(date), None)
      .await
      .expect("Failed to insert test workout");

    for entry in [
      NewWorkoutEntry {
        exercise_id: exercises.bench_press,
        sets: 3,
        reps: 10,
        weight: 80.0,
        comment: None,
      },
      NewWorkoutEntry {
        exercise_id: exercises.running,
        sets: 1,
        reps: 30,
        weight: 0.0,
        comment: None,
      },
    ] {
      db::add_workout_entry(pool, workout_id, &entry)
        .await
        .expect("Failed to insert test entry");
    }

    workout_ids.push(workout_id);
  }

  workout_ids
}

/// ---------------------------------------------------------------------------
/// Record Factories
/// ---------------------------------------------------------------------------

pub fn mock_exercise(id: i64, name: &str, category: Category) -> Exercise {
  Exercise {
    id,
    name: name.to_string(),
    category,
  }
}

pub fn strength_entry(exercise: &Exercise, sets: u32, reps: u32, weight: f64) -> WorkoutEntry {
  WorkoutEntry {
    id: 0,
    exercise: exercise.clone(),
    sets,
    reps,
    weight,
    comment: None,
  }
}

/// Cardio entry: `minutes` goes into the reps field, weight is zero
pub fn cardio_entry(exercise: &Exercise, sets: u32, minutes: u32) -> WorkoutEntry {
  strength_entry(exercise, sets, minutes, 0.0)
}

pub fn mock_workout(id: i64, date: NaiveDateTime, entries: Vec<WorkoutEntry>) -> Workout {
  Workout {
    id,
    date,
    notes: None,
    entries,
  }
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Local wall-clock time on the hour
pub fn at(year: i32, month: u32, d: u32, hour: u32) -> NaiveDateTime {
  day(year, month, d).and_hms_opt(hour, 0, 0).expect("valid time")
}

/// Dates `offsets` whole days before `now`
pub fn dates_days_ago(now: NaiveDateTime, offsets: &[i64]) -> Vec<NaiveDateTime> {
  offsets
    .iter()
    .map(|&o| now - chrono::Duration::days(o))
    .collect()
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = (($left) - ($right) as f64).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('users', 'exercises', 'workouts', 'workout_entries')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 4, "Expected 4 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_workouts_returns_correct_count() {
    let pool = setup_test_db().await;
    let user_id = seed_test_user(&pool, "maksim").await;
    let exercises = seed_test_exercises(&pool, user_id).await;

    let ids = seed_test_workouts(&pool, user_id, &exercises, at(2025, 9, 25, 18), &[0, 1, 2, 3, 4]).await;
    assert_eq!(ids.len(), 5);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workout_entries")
      .fetch_one(&pool)
      .await
      .expect("Failed to count entries");

    assert_eq!(count, 10);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_time_helpers() {
    let now = at(2025, 9, 25, 18);
    let dates = dates_days_ago(now, &[0, 7]);
    assert_eq!(dates[0], now);
    assert_eq!(dates[1].date(), day(2025, 9, 18));
  }
}
