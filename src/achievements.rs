//! Streaks and Achievements
//!
//! Streaks walk workouts from the most recent backwards, comparing calendar
//! days. Achievements are a static rule table evaluated against lifetime
//! totals, streaks and recent activity counts.
//!
//! Key principles:
//! - Nothing is persisted: unlock state is recomputed on every evaluation
//! - Rules are data, so thresholds can be added without touching evaluation
//! - Streak and recent-count achievements can lock again when activity stops

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::Workout;
use crate::stats::Totals;

// ---------------------------------------------------------------------------
/// Streaks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive-day run ending at the most recent workout
    pub current_streak_days: u32,
    /// Longest consecutive-day run anywhere in the history
    pub max_streak_days: u32,
}

pub fn compute_streaks(workouts: &[Workout]) -> StreakState {
    let dates: Vec<NaiveDateTime> = workouts.iter().map(|w| w.date).collect();
    streaks_from_dates(&dates)
}

/// Walk dates newest first.
///
/// A gap of one day extends the streak, a larger gap closes it and starts a
/// new run of 1. Two workouts on the same day leave the counter untouched:
/// the second one neither extends nor breaks the run.
pub fn streaks_from_dates(dates: &[NaiveDateTime]) -> StreakState {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut current = 0u32;
    let mut max = 0u32;
    let mut leading: Option<u32> = None;
    let mut last_day: Option<NaiveDate> = None;

    for date in sorted {
        let day = date.date();
        match last_day {
            None => current = 1,
            Some(previous) => {
                let days_between = (previous - day).num_days();
                if days_between == 1 {
                    current += 1;
                } else if days_between > 1 {
                    // First break closes the run that ends at the latest workout
                    leading.get_or_insert(current);
                    max = max.max(current);
                    current = 1;
                }
            }
        }
        last_day = Some(day);
    }

    max = max.max(current);

    StreakState {
        current_streak_days: leading.unwrap_or(current),
        max_streak_days: max,
    }
}

// ---------------------------------------------------------------------------
/// Recent Activity Counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCounts {
    /// Workouts dated within 7 days before `now` (or later)
    pub last_7_days: u64,
    /// Workouts in the calendar month of `now`
    pub current_month: u64,
    /// Workouts on the calendar day of `now`
    pub today: u64,
}

impl RecentCounts {
    pub fn collect(workouts: &[Workout], now: NaiveDateTime) -> Self {
        let week_ago = now.checked_sub_days(Days::new(7)).unwrap_or(NaiveDateTime::MIN);
        let today = now.date();

        let mut counts = Self::default();
        for workout in workouts {
            if workout.date >= week_ago {
                counts.last_7_days += 1;
            }
            if workout.date.year() == now.year() && workout.date.month() == now.month() {
                counts.current_month += 1;
            }
            if workout.day() == today {
                counts.today += 1;
            }
        }
        counts
    }
}

// ---------------------------------------------------------------------------
/// Achievement Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementMetric {
    TotalWorkouts,
    TotalSets,
    TotalReps,
    MaxStreakDays,
    TotalStrengthVolumeKg,
    WorkoutsInLast7Days,
    WorkoutsInCurrentCalendarMonth,
    WorkoutsToday,
}

impl AchievementMetric {
    /// Whether the metric can only grow as more workouts are logged
    pub fn is_monotonic(&self) -> bool {
        matches!(
            self,
            Self::TotalWorkouts | Self::TotalSets | Self::TotalReps | Self::TotalStrengthVolumeKg
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementRule {
    pub id: &'static str,
    pub metric: AchievementMetric,
    pub threshold: u64,
}

const fn rule(id: &'static str, metric: AchievementMetric, threshold: u64) -> AchievementRule {
    AchievementRule { id, metric, threshold }
}

/// Display order is catalog order
pub const ACHIEVEMENT_CATALOG: &[AchievementRule] = &[
    rule("first_workout", AchievementMetric::TotalWorkouts, 1),
    rule("five_workouts", AchievementMetric::TotalWorkouts, 5),
    rule("ten_workouts", AchievementMetric::TotalWorkouts, 10),
    rule("twenty_workouts", AchievementMetric::TotalWorkouts, 20),
    rule("fifty_workouts", AchievementMetric::TotalWorkouts, 50),
    rule("hundred_workouts", AchievementMetric::TotalWorkouts, 100),
    rule("hundred_sets", AchievementMetric::TotalSets, 100),
    rule("five_hundred_sets", AchievementMetric::TotalSets, 500),
    rule("thousand_sets", AchievementMetric::TotalSets, 1_000),
    rule("two_thousand_sets", AchievementMetric::TotalSets, 2_000),
    rule("five_thousand_sets", AchievementMetric::TotalSets, 5_000),
    rule("ten_thousand_reps", AchievementMetric::TotalReps, 10_000),
    rule("week_streak", AchievementMetric::MaxStreakDays, 7),
    rule("two_weeks_streak", AchievementMetric::MaxStreakDays, 14),
    rule("month_streak", AchievementMetric::MaxStreakDays, 30),
    rule("heavy_lifter", AchievementMetric::TotalStrengthVolumeKg, 1_000),
    rule("mass_5k", AchievementMetric::TotalStrengthVolumeKg, 5_000),
    rule("mass_10k", AchievementMetric::TotalStrengthVolumeKg, 10_000),
    rule("week_3_workouts", AchievementMetric::WorkoutsInLast7Days, 3),
    rule("month_12_workouts", AchievementMetric::WorkoutsInCurrentCalendarMonth, 12),
    rule("double_day", AchievementMetric::WorkoutsToday, 2),
];

// ---------------------------------------------------------------------------
/// Evaluation
// ---------------------------------------------------------------------------

/// Every metric value a rule can reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementMetrics {
    pub total_workouts: u64,
    pub total_sets: u64,
    pub total_reps: u64,
    pub max_streak_days: u64,
    pub total_strength_volume_kg: u64,
    pub workouts_in_last_7_days: u64,
    pub workouts_in_current_calendar_month: u64,
    pub workouts_today: u64,
}

impl AchievementMetrics {
    pub fn new(totals: &Totals, streaks: &StreakState, recent: &RecentCounts) -> Self {
        Self {
            total_workouts: totals.workout_count,
            total_sets: totals.total_sets,
            total_reps: totals.total_reps,
            max_streak_days: streaks.max_streak_days as u64,
            // Whole kilograms, truncated
            total_strength_volume_kg: totals.total_strength_volume.max(0.0) as u64,
            workouts_in_last_7_days: recent.last_7_days,
            workouts_in_current_calendar_month: recent.current_month,
            workouts_today: recent.today,
        }
    }

    /// Gather lifetime metrics from a full workout history
    pub fn collect(workouts: &[Workout], now: NaiveDateTime) -> Self {
        Self::new(
            &Totals::from_workouts(workouts),
            &compute_streaks(workouts),
            &RecentCounts::collect(workouts, now),
        )
    }

    pub fn value(&self, metric: AchievementMetric) -> u64 {
        match metric {
            AchievementMetric::TotalWorkouts => self.total_workouts,
            AchievementMetric::TotalSets => self.total_sets,
            AchievementMetric::TotalReps => self.total_reps,
            AchievementMetric::MaxStreakDays => self.max_streak_days,
            AchievementMetric::TotalStrengthVolumeKg => self.total_strength_volume_kg,
            AchievementMetric::WorkoutsInLast7Days => self.workouts_in_last_7_days,
            AchievementMetric::WorkoutsInCurrentCalendarMonth => self.workouts_in_current_calendar_month,
            AchievementMetric::WorkoutsToday => self.workouts_today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementStatus {
    pub id: String,
    pub metric: AchievementMetric,
    pub unlocked: bool,
    /// Unlocked on a metric that only grows, so it stays unlocked
    pub permanent: bool,
    pub progress: u64,
    pub max_progress: u64,
}

impl AchievementStatus {
    /// Progress-bar fill in `0.0..=1.0`
    pub fn fraction(&self) -> f64 {
        if self.max_progress == 0 {
            return if self.unlocked { 1.0 } else { 0.0 };
        }
        self.progress as f64 / self.max_progress as f64
    }
}

pub fn evaluate_rule(rule: &AchievementRule, metrics: &AchievementMetrics) -> AchievementStatus {
    let value = metrics.value(rule.metric);
    let unlocked = value >= rule.threshold;
    AchievementStatus {
        id: rule.id.to_string(),
        metric: rule.metric,
        unlocked,
        permanent: unlocked && rule.metric.is_monotonic(),
        progress: value.min(rule.threshold),
        max_progress: rule.threshold,
    }
}

/// Evaluate an arbitrary rule table
pub fn evaluate_catalog(catalog: &[AchievementRule], metrics: &AchievementMetrics) -> Vec<AchievementStatus> {
    catalog.iter().map(|rule| evaluate_rule(rule, metrics)).collect()
}

/// Evaluate the built-in catalog
pub fn evaluate_achievements(
    totals: &Totals,
    streaks: &StreakState,
    recent: &RecentCounts,
) -> Vec<AchievementStatus> {
    evaluate_catalog(ACHIEVEMENT_CATALOG, &AchievementMetrics::new(totals, streaks, recent))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementSummary {
    pub unlocked: usize,
    pub total: usize,
    /// Whole-number completion percentage, 0 for an empty catalog
    pub completion_pct: u32,
}

pub fn summarize(statuses: &[AchievementStatus]) -> AchievementSummary {
    let unlocked = statuses.iter().filter(|s| s.unlocked).count();
    let total = statuses.len();
    let completion_pct = if total > 0 {
        (unlocked * 100 / total) as u32
    } else {
        0
    };

    AchievementSummary {
        unlocked,
        total,
        completion_pct,
    }
}
