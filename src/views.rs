//! Display-ready views built from the same period-filtered records as the stats

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Category, Workout};
use crate::period::Period;
use crate::stats::workouts_in_period;

/// ---------------------------------------------------------------------------
/// Category Breakdown
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
  pub category: Category,
  pub strength_volume: f64,
  /// Fraction of the period's total strength volume
  pub share_of_total: f64,
}

/// Strength volume by category, largest first.
///
/// Categories with zero volume are omitted, which always includes cardio.
/// Returns an empty list when the period has no strength volume at all.
pub fn category_breakdown(workouts: &[Workout], period: Period, now: NaiveDateTime) -> Vec<CategoryBreakdown> {
  let mut by_category: HashMap<Category, f64> = HashMap::new();
  let mut total = 0.0;

  for workout in workouts_in_period(workouts, period, now) {
    for entry in &workout.entries {
      let volume = entry.strength_volume();
      if volume > 0.0 {
        *by_category.entry(entry.exercise.category.clone()).or_insert(0.0) += volume;
        total += volume;
      }
    }
  }

  if total <= 0.0 {
    return Vec::new();
  }

  let mut items: Vec<_> = by_category
    .into_iter()
    .map(|(category, strength_volume)| CategoryBreakdown {
      category,
      strength_volume,
      share_of_total: strength_volume / total,
    })
    .collect();

  items.sort_by(|a, b| {
    b.strength_volume
      .total_cmp(&a.strength_volume)
      .then_with(|| a.category.as_str().cmp(b.category.as_str()))
  });
  items
}

/// ---------------------------------------------------------------------------
/// Estimated One-Rep Max
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecordEstimate {
  pub exercise_id: i64,
  pub exercise_name: String,
  pub estimated_1rm: f64,
  /// When the best estimate was logged
  pub achieved_at: NaiveDateTime,
}

/// Epley estimate: weight × (1 + reps / 30).
///
/// This is an approximation from a submaximal set, not a tested maximum. It
/// drifts upward for high-rep sets and should be shown as an estimate.
pub fn epley_one_rep_max(weight: f64, reps: u32) -> f64 {
  weight * (1.0 + reps as f64 / 30.0)
}

/// Best estimated 1RM per strength exercise in the period, highest first
pub fn estimated_one_rep_max(
  workouts: &[Workout],
  period: Period,
  now: NaiveDateTime,
) -> Vec<PersonalRecordEstimate> {
  let mut best: HashMap<i64, PersonalRecordEstimate> = HashMap::new();

  for workout in workouts_in_period(workouts, period, now) {
    for entry in workout.entries.iter().filter(|e| !e.is_cardio()) {
      let estimate = epley_one_rep_max(entry.weight, entry.reps);
      let candidate = PersonalRecordEstimate {
        exercise_id: entry.exercise.id,
        exercise_name: entry.exercise.name.clone(),
        estimated_1rm: estimate,
        achieved_at: workout.date,
      };

      match best.get_mut(&entry.exercise.id) {
        Some(current) if estimate > current.estimated_1rm => *current = candidate,
        Some(_) => {}
        None => {
          best.insert(entry.exercise.id, candidate);
        }
      }
    }
  }

  let mut records: Vec<_> = best.into_values().collect();
  records.sort_by(|a, b| {
    b.estimated_1rm
      .total_cmp(&a.estimated_1rm)
      .then_with(|| a.exercise_name.cmp(&b.exercise_name))
  });
  records
}

/// ---------------------------------------------------------------------------
/// Activity Heatmap
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityHeatmapCell {
  pub day: NaiveDate,
  /// Σ sets × reps for strength plus Σ minutes for cardio
  pub score: u64,
  /// score normalized by the busiest day in the window, `0.0..=1.0`
  pub intensity: f64,
}

/// One cell per calendar day of the trailing window ending today, oldest first
pub fn activity_heatmap(workouts: &[Workout], period: Period, now: NaiveDateTime) -> Vec<ActivityHeatmapCell> {
  let window = period.heatmap_window(now.date());
  let (Some(&first), Some(&last)) = (window.first(), window.last()) else {
    return Vec::new();
  };

  let mut scores: HashMap<NaiveDate, u64> = HashMap::new();
  for workout in workouts {
    let day = workout.day();
    if day < first || day > last {
      continue;
    }
    let score: u64 = workout.entries.iter().map(|e| e.activity_score()).sum();
    *scores.entry(day).or_insert(0) += score;
  }

  let max_score = scores.values().copied().max().unwrap_or(0);

  window
    .into_iter()
    .map(|day| {
      let score = scores.get(&day).copied().unwrap_or(0);
      let intensity = if max_score > 0 {
        score as f64 / max_score as f64
      } else {
        0.0
      };
      ActivityHeatmapCell { day, score, intensity }
    })
    .collect()
}
