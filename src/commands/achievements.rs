//! Streak and achievement commands

use chrono::NaiveDateTime;

use super::load_user_snapshot;
use crate::achievements::{
    compute_streaks, evaluate_catalog, summarize, AchievementMetrics, AchievementStatus, AchievementSummary,
    StreakState, ACHIEVEMENT_CATALOG,
};
use crate::db::AppState;
use crate::error::Result;

pub async fn get_streaks(state: &AppState, user_id: i64) -> Result<StreakState> {
    let snapshot = load_user_snapshot(state, user_id).await?;
    let streaks = compute_streaks(&snapshot.workouts);

    tracing::info!(
        user_id,
        current = streaks.current_streak_days,
        max = streaks.max_streak_days,
        "Computed streaks"
    );

    Ok(streaks)
}

/// Every catalog achievement with its progress, in catalog order
pub async fn get_achievements(state: &AppState, user_id: i64, now: NaiveDateTime) -> Result<Vec<AchievementStatus>> {
    let snapshot = load_user_snapshot(state, user_id).await?;
    let metrics = AchievementMetrics::collect(&snapshot.workouts, now);
    let statuses = evaluate_catalog(ACHIEVEMENT_CATALOG, &metrics);

    tracing::debug!(
        user_id,
        unlocked = statuses.iter().filter(|s| s.unlocked).count(),
        "Evaluated achievements"
    );

    Ok(statuses)
}

pub async fn get_achievement_summary(state: &AppState, user_id: i64, now: NaiveDateTime) -> Result<AchievementSummary> {
    let statuses = get_achievements(state, user_id, now).await?;
    Ok(summarize(&statuses))
}
