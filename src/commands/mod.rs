//! Application-facing commands.
//!
//! Each command loads the user's full history from the store and hands it to
//! the pure aggregation functions. `now` is passed in so callers control the
//! clock.

pub mod achievements;
pub mod assistant;
pub mod progress;
pub mod stats;

use crate::db::{self, AppState, DateRange};
use crate::error::Result;
use crate::models::WorkoutSnapshot;

/// Load every workout of `user_id`. Deltas and streaks need history outside
/// the requested period, so no date bound is applied here.
pub(crate) async fn load_user_snapshot(state: &AppState, user_id: i64) -> Result<WorkoutSnapshot> {
  let snapshot = db::load_snapshot(&state.db, user_id, DateRange::default()).await?;

  tracing::debug!(
    user_id,
    workouts = snapshot.workouts.len(),
    skipped = snapshot.skipped.total(),
    "Snapshot ready"
  );

  if snapshot.is_empty() {
    tracing::debug!(user_id, "User has no dated workouts");
  }

  Ok(snapshot)
}

/// Resolve a username to its id
pub async fn resolve_user(state: &AppState, username: &str) -> Result<i64> {
  let user = db::require_user(&state.db, username).await?;
  Ok(user.id)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::{AppError, StoreError};
  use crate::test_utils::{at, seed_test_exercises, seed_test_user, seed_test_workouts, setup_test_db, test_state};

  #[tokio::test]
  async fn test_resolve_unknown_user_fails() {
    let state = test_state(setup_test_db().await);

    let err = resolve_user(&state, "nobody").await.unwrap_err();
    assert!(matches!(err, AppError::Store(StoreError::UserNotFound(_))));
    assert_eq!(err.code(), "user_not_found");
  }

  #[tokio::test]
  async fn test_snapshot_is_scoped_to_user() {
    let pool = setup_test_db().await;
    let maksim = seed_test_user(&pool, "maksim").await;
    let other = seed_test_user(&pool, "other").await;
    let now = at(2025, 9, 25, 18);
    let ex_a = seed_test_exercises(&pool, maksim).await;
    let ex_b = seed_test_exercises(&pool, other).await;
    seed_test_workouts(&pool, maksim, &ex_a, now, &[0, 1]).await;
    seed_test_workouts(&pool, other, &ex_b, now, &[0]).await;

    let state = test_state(pool);

    assert_eq!(resolve_user(&state, "maksim").await.unwrap(), maksim);
    let snapshot = load_user_snapshot(&state, maksim).await.unwrap();
    assert_eq!(snapshot.workouts.len(), 2);
    assert_eq!(snapshot.skipped.total(), 0);
  }
}
