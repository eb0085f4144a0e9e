//! Derived progress views and the combined progress report

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::load_user_snapshot;
use crate::achievements::{
  compute_streaks, evaluate_catalog, summarize, AchievementMetrics, AchievementStatus, AchievementSummary,
  StreakState, ACHIEVEMENT_CATALOG,
};
use crate::db::AppState;
use crate::error::Result;
use crate::models::SkippedRecords;
use crate::period::Period;
use crate::stats::{compute_stats, exercise_maxima, ExerciseMaximum, PeriodStats};
use crate::views::{
  activity_heatmap, category_breakdown, estimated_one_rep_max, ActivityHeatmapCell, CategoryBreakdown,
  PersonalRecordEstimate,
};

pub async fn get_category_breakdown(
  state: &AppState,
  user_id: i64,
  period: Period,
  now: NaiveDateTime,
) -> Result<Vec<CategoryBreakdown>> {
  let snapshot = load_user_snapshot(state, user_id).await?;
  Ok(category_breakdown(&snapshot.workouts, period, now))
}

pub async fn get_personal_records(
  state: &AppState,
  user_id: i64,
  period: Period,
  now: NaiveDateTime,
) -> Result<Vec<PersonalRecordEstimate>> {
  let snapshot = load_user_snapshot(state, user_id).await?;
  Ok(estimated_one_rep_max(&snapshot.workouts, period, now))
}

pub async fn get_activity_heatmap(
  state: &AppState,
  user_id: i64,
  period: Period,
  now: NaiveDateTime,
) -> Result<Vec<ActivityHeatmapCell>> {
  let snapshot = load_user_snapshot(state, user_id).await?;
  Ok(activity_heatmap(&snapshot.workouts, period, now))
}

/// Everything the progress screen shows for one period, from a single snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
  pub generated_at: NaiveDateTime,
  pub stats: PeriodStats,
  pub maxima: Vec<ExerciseMaximum>,
  pub streaks: StreakState,
  pub achievements: Vec<AchievementStatus>,
  pub achievement_summary: AchievementSummary,
  pub categories: Vec<CategoryBreakdown>,
  pub personal_records: Vec<PersonalRecordEstimate>,
  pub heatmap: Vec<ActivityHeatmapCell>,
  /// Stored records left out of every figure above
  pub skipped: SkippedRecords,
}

pub async fn get_progress_report(
  state: &AppState,
  user_id: i64,
  period: Period,
  now: NaiveDateTime,
) -> Result<ProgressReport> {
  let snapshot = load_user_snapshot(state, user_id).await?;
  let workouts = &snapshot.workouts;

  let achievements = evaluate_catalog(ACHIEVEMENT_CATALOG, &AchievementMetrics::collect(workouts, now));
  let achievement_summary = summarize(&achievements);

  let report = ProgressReport {
    generated_at: now,
    stats: compute_stats(workouts, period, now),
    maxima: exercise_maxima(workouts, period, now),
    streaks: compute_streaks(workouts),
    achievements,
    achievement_summary,
    categories: category_breakdown(workouts, period, now),
    personal_records: estimated_one_rep_max(workouts, period, now),
    heatmap: activity_heatmap(workouts, period, now),
    skipped: snapshot.skipped,
  };

  tracing::info!(
    user_id,
    %period,
    workouts = report.stats.workout_count,
    unlocked = report.achievement_summary.unlocked,
    skipped = report.skipped.total(),
    "Built progress report"
  );

  Ok(report)
}
