//! Period statistics commands

use chrono::NaiveDateTime;

use super::load_user_snapshot;
use crate::db::AppState;
use crate::error::Result;
use crate::period::Period;
use crate::stats::{
  compute_stats, daily_volume, exercise_maxima, exercise_progress, DailyVolumePoint, ExerciseMaximum,
  ExerciseProgressPoint, PeriodStats,
};

pub async fn get_period_stats(
  state: &AppState,
  user_id: i64,
  period: Period,
  now: NaiveDateTime,
) -> Result<PeriodStats> {
  let snapshot = load_user_snapshot(state, user_id).await?;
  let stats = compute_stats(&snapshot.workouts, period, now);

  tracing::info!(
    user_id,
    %period,
    workouts = stats.workout_count,
    volume = stats.total_strength_volume,
    "Computed period stats"
  );

  Ok(stats)
}

pub async fn get_exercise_maxima(
  state: &AppState,
  user_id: i64,
  period: Period,
  now: NaiveDateTime,
) -> Result<Vec<ExerciseMaximum>> {
  let snapshot = load_user_snapshot(state, user_id).await?;
  Ok(exercise_maxima(&snapshot.workouts, period, now))
}

pub async fn get_daily_volume(
  state: &AppState,
  user_id: i64,
  period: Period,
  now: NaiveDateTime,
) -> Result<Vec<DailyVolumePoint>> {
  let snapshot = load_user_snapshot(state, user_id).await?;
  Ok(daily_volume(&snapshot.workouts, period, now))
}

/// Weight history of one exercise across the whole log
pub async fn get_exercise_progress(
  state: &AppState,
  user_id: i64,
  exercise_id: i64,
) -> Result<Vec<ExerciseProgressPoint>> {
  let snapshot = load_user_snapshot(state, user_id).await?;
  Ok(exercise_progress(exercise_id, &snapshot.workouts))
}
