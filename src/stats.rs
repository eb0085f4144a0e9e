//! Period statistics derived from logged workouts
//!
//! Every function here is a pure read over a workout slice: no caching, no
//! store access. Cardio entries are kept apart from strength work throughout;
//! their reps are minutes and never contribute to strength volume.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Category, Workout};
use crate::period::Period;

/// ---------------------------------------------------------------------------
/// Totals
/// ---------------------------------------------------------------------------

/// Raw sums over a set of workouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
  pub workout_count: u64,
  /// Sets across all entries, cardio included
  pub total_sets: u64,
  /// sets × reps across all entries, cardio included
  pub total_reps: u64,
  /// weight × sets × reps across strength entries (kg)
  pub total_strength_volume: f64,
  /// sets × reps across cardio entries
  pub total_cardio_minutes: u64,
}

impl Totals {
  pub fn add_workout(&mut self, workout: &Workout) {
    self.workout_count += 1;
    for entry in &workout.entries {
      self.total_sets += entry.sets as u64;
      self.total_reps += entry.reps_performed();
      self.total_strength_volume += entry.strength_volume();
      self.total_cardio_minutes += entry.cardio_minutes();
    }
  }

  pub fn from_workouts<'a>(workouts: impl IntoIterator<Item = &'a Workout>) -> Self {
    let mut totals = Self::default();
    for workout in workouts {
      totals.add_workout(workout);
    }
    totals
  }
}

/// Current minus previous period. Workout count has no delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsDelta {
  pub sets: i64,
  pub reps: i64,
  pub strength_volume: f64,
  pub cardio_minutes: i64,
}

impl StatsDelta {
  pub fn between(current: &Totals, previous: &Totals) -> Self {
    Self {
      sets: current.total_sets as i64 - previous.total_sets as i64,
      reps: current.total_reps as i64 - previous.total_reps as i64,
      strength_volume: current.total_strength_volume - previous.total_strength_volume,
      cardio_minutes: current.total_cardio_minutes as i64 - previous.total_cardio_minutes as i64,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
  pub period: Period,
  pub workout_count: u64,
  pub total_sets: u64,
  pub total_reps: u64,
  pub total_strength_volume: f64,
  pub total_cardio_minutes: u64,
  pub delta: StatsDelta,
}

/// Workouts falling into the current window of `period`
pub fn workouts_in_period<'a>(
  workouts: &'a [Workout],
  period: Period,
  now: NaiveDateTime,
) -> impl Iterator<Item = &'a Workout> + 'a {
  workouts.iter().filter(move |w| period.contains(w.date, now))
}

/// Compute totals for the current window and the delta against the window before it
pub fn compute_stats(workouts: &[Workout], period: Period, now: NaiveDateTime) -> PeriodStats {
  let current = Totals::from_workouts(workouts_in_period(workouts, period, now));

  let delta = match period.previous_window(now) {
    Some((start, end)) => {
      let previous = Totals::from_workouts(
        workouts.iter().filter(|w| w.date >= start && w.date < end),
      );
      StatsDelta::between(&current, &previous)
    }
    None => StatsDelta::default(),
  };

  PeriodStats {
    period,
    workout_count: current.workout_count,
    total_sets: current.total_sets,
    total_reps: current.total_reps,
    total_strength_volume: current.total_strength_volume,
    total_cardio_minutes: current.total_cardio_minutes,
    delta,
  }
}

/// ---------------------------------------------------------------------------
/// Per-Exercise Views
/// ---------------------------------------------------------------------------

/// Heaviest weight and set count for one exercise within a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseMaximum {
  pub exercise_id: i64,
  pub exercise_name: String,
  pub category: Category,
  pub max_weight: f64,
  pub total_sets: u64,
}

/// Per-exercise maxima, heaviest first (ties broken by name)
pub fn exercise_maxima(workouts: &[Workout], period: Period, now: NaiveDateTime) -> Vec<ExerciseMaximum> {
  let mut by_exercise: HashMap<i64, ExerciseMaximum> = HashMap::new();

  for workout in workouts_in_period(workouts, period, now) {
    for entry in &workout.entries {
      by_exercise
        .entry(entry.exercise.id)
        .and_modify(|m| {
          m.max_weight = m.max_weight.max(entry.weight);
          m.total_sets += entry.sets as u64;
        })
        .or_insert_with(|| ExerciseMaximum {
          exercise_id: entry.exercise.id,
          exercise_name: entry.exercise.name.clone(),
          category: entry.exercise.category.clone(),
          max_weight: entry.weight,
          total_sets: entry.sets as u64,
        });
    }
  }

  let mut maxima: Vec<_> = by_exercise.into_values().collect();
  maxima.sort_by(|a, b| {
    b.max_weight
      .total_cmp(&a.max_weight)
      .then_with(|| a.exercise_name.cmp(&b.exercise_name))
  });
  maxima
}

/// Strength volume for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyVolumePoint {
  pub day: NaiveDate,
  pub strength_volume: f64,
}

/// Strength volume per training day in the period, oldest first.
/// Days with workouts but only cardio appear with zero volume.
pub fn daily_volume(workouts: &[Workout], period: Period, now: NaiveDateTime) -> Vec<DailyVolumePoint> {
  let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

  for workout in workouts_in_period(workouts, period, now) {
    let volume: f64 = workout.entries.iter().map(|e| e.strength_volume()).sum();
    *by_day.entry(workout.day()).or_insert(0.0) += volume;
  }

  by_day
    .into_iter()
    .map(|(day, strength_volume)| DailyVolumePoint { day, strength_volume })
    .collect()
}

/// Logged weight of an exercise at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProgressPoint {
  pub date: NaiveDateTime,
  pub weight: f64,
}

/// Every logged weight for `exercise_id`, oldest first
pub fn exercise_progress(exercise_id: i64, workouts: &[Workout]) -> Vec<ExerciseProgressPoint> {
  let mut points: Vec<_> = workouts
    .iter()
    .flat_map(|w| {
      w.entries
        .iter()
        .filter(|e| e.exercise.id == exercise_id)
        .map(move |e| ExerciseProgressPoint {
          date: w.date,
          weight: e.weight,
        })
    })
    .collect();

  points.sort_by(|a, b| a.date.cmp(&b.date));
  points
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::test_utils::{at, cardio_entry, day, mock_exercise, mock_workout, strength_entry};

  #[test]
  fn test_strength_entry_contributes_weight_sets_reps() {
    let bench = mock_exercise(1, "Bench Press", Category::Chest);
    let now = at(2025, 9, 25, 18);
    let workouts = vec![mock_workout(1, at(2025, 9, 24, 10), vec![strength_entry(&bench, 3, 10, 80.0)])];

    let stats = compute_stats(&workouts, Period::Week, now);

    assert_eq!(stats.workout_count, 1);
    assert_eq!(stats.total_sets, 3);
    assert_eq!(stats.total_reps, 30);
    assert_approx_eq!(stats.total_strength_volume, 2400.0, 1e-9);
    assert_eq!(stats.total_cardio_minutes, 0);
  }

  #[test]
  fn test_cardio_entry_counts_minutes_and_reps_but_no_volume() {
    let running = mock_exercise(2, "Running", Category::Cardio);
    let now = at(2025, 9, 25, 18);
    let workouts = vec![mock_workout(1, at(2025, 9, 24, 10), vec![cardio_entry(&running, 1, 30)])];

    let stats = compute_stats(&workouts, Period::Week, now);

    assert_eq!(stats.total_cardio_minutes, 30);
    assert_eq!(stats.total_strength_volume, 0.0);
    assert_eq!(stats.total_reps, 30);
    assert_eq!(stats.total_sets, 1);
  }

  #[test]
  fn test_cardio_with_weight_never_leaks_into_volume() {
    // A weighted cardio entry (e.g. a loaded carry logged as cardio) still adds no volume
    let rower = mock_exercise(3, "Rowing", Category::parse("CARDIO"));
    let now = at(2025, 9, 25, 18);
    let workouts = vec![mock_workout(1, at(2025, 9, 25, 7), vec![strength_entry(&rower, 2, 15, 40.0)])];

    let stats = compute_stats(&workouts, Period::Week, now);

    assert_eq!(stats.total_strength_volume, 0.0);
    assert_eq!(stats.total_cardio_minutes, 30);
  }

  #[test]
  fn test_delta_against_previous_week() {
    let squat = mock_exercise(1, "Squat", Category::Legs);
    let now = at(2025, 9, 25, 18);
    let workouts = vec![
      // previous window: [Sep 11 18:00, Sep 18 18:00)
      mock_workout(1, at(2025, 9, 12, 9), vec![strength_entry(&squat, 5, 5, 100.0)]),
      mock_workout(2, at(2025, 9, 15, 9), vec![strength_entry(&squat, 5, 5, 100.0)]),
      // current window
      mock_workout(3, at(2025, 9, 20, 9), vec![strength_entry(&squat, 3, 5, 110.0)]),
    ];

    let stats = compute_stats(&workouts, Period::Week, now);

    assert_eq!(stats.workout_count, 1);
    assert_eq!(stats.delta.sets, 3 - 10);
    assert_eq!(stats.delta.reps, 15 - 50);
    assert_approx_eq!(stats.delta.strength_volume, 1650.0 - 5000.0, 1e-9);
    assert_eq!(stats.delta.cardio_minutes, 0);
  }

  #[test]
  fn test_empty_period_gives_negative_delta() {
    let running = mock_exercise(2, "Running", Category::Cardio);
    let now = at(2025, 9, 25, 18);
    let workouts = vec![mock_workout(1, at(2025, 9, 14, 9), vec![cardio_entry(&running, 2, 20)])];

    let stats = compute_stats(&workouts, Period::Week, now);

    assert_eq!(stats.workout_count, 0);
    assert_eq!(stats.total_cardio_minutes, 0);
    assert_eq!(stats.delta.cardio_minutes, -40);
    assert_eq!(stats.delta.sets, -2);
    assert_eq!(stats.delta.reps, -40);
  }

  #[test]
  fn test_no_workouts_is_all_zero() {
    let stats = compute_stats(&[], Period::Month, at(2025, 9, 25, 18));
    assert_eq!(stats.workout_count, 0);
    assert_eq!(stats.total_sets, 0);
    assert_eq!(stats.total_strength_volume, 0.0);
    assert_eq!(stats.delta, StatsDelta::default());
  }

  #[test]
  fn test_month_window_uses_calendar_months() {
    let curl = mock_exercise(4, "Curl", Category::Arms);
    let now = at(2025, 3, 31, 12);
    let workouts = vec![
      // Feb 28 12:00 is the inclusive start of the current window
      mock_workout(1, at(2025, 2, 28, 12), vec![strength_entry(&curl, 1, 10, 10.0)]),
      // Feb 27 falls into the previous window [Jan 31, Feb 28)
      mock_workout(2, at(2025, 2, 27, 12), vec![strength_entry(&curl, 2, 10, 10.0)]),
      // Jan 30 is outside both windows
      mock_workout(3, at(2025, 1, 30, 12), vec![strength_entry(&curl, 4, 10, 10.0)]),
    ];

    let stats = compute_stats(&workouts, Period::Month, now);

    assert_eq!(stats.workout_count, 1);
    assert_eq!(stats.total_sets, 1);
    assert_eq!(stats.delta.sets, 1 - 2);
  }

  #[test]
  fn test_all_period_counts_everything_without_delta() {
    let curl = mock_exercise(4, "Curl", Category::Arms);
    let now = at(2025, 9, 25, 18);
    let workouts = vec![
      mock_workout(1, at(2019, 1, 1, 12), vec![strength_entry(&curl, 1, 10, 10.0)]),
      mock_workout(2, at(2025, 9, 1, 12), vec![strength_entry(&curl, 1, 10, 10.0)]),
    ];

    let stats = compute_stats(&workouts, Period::All, now);

    assert_eq!(stats.workout_count, 2);
    assert_eq!(stats.delta, StatsDelta::default());
  }

  #[test]
  fn test_exercise_maxima_sorted_by_weight() {
    let bench = mock_exercise(1, "Bench Press", Category::Chest);
    let squat = mock_exercise(2, "Squat", Category::Legs);
    let now = at(2025, 9, 25, 18);
    let workouts = vec![
      mock_workout(
        1,
        at(2025, 9, 22, 10),
        vec![strength_entry(&bench, 3, 8, 80.0), strength_entry(&squat, 5, 5, 120.0)],
      ),
      mock_workout(2, at(2025, 9, 24, 10), vec![strength_entry(&bench, 2, 5, 90.0)]),
      // outside the week
      mock_workout(3, at(2025, 9, 1, 10), vec![strength_entry(&bench, 1, 1, 200.0)]),
    ];

    let maxima = exercise_maxima(&workouts, Period::Week, now);

    assert_eq!(maxima.len(), 2);
    assert_eq!(maxima[0].exercise_name, "Squat");
    assert_eq!(maxima[0].max_weight, 120.0);
    assert_eq!(maxima[1].exercise_name, "Bench Press");
    assert_eq!(maxima[1].max_weight, 90.0);
    assert_eq!(maxima[1].total_sets, 5);
  }

  #[test]
  fn test_daily_volume_groups_by_day_and_skips_cardio() {
    let bench = mock_exercise(1, "Bench Press", Category::Chest);
    let running = mock_exercise(2, "Running", Category::Cardio);
    let now = at(2025, 9, 25, 18);
    let workouts = vec![
      mock_workout(1, at(2025, 9, 22, 8), vec![strength_entry(&bench, 1, 10, 50.0)]),
      mock_workout(2, at(2025, 9, 22, 19), vec![strength_entry(&bench, 1, 10, 60.0)]),
      mock_workout(3, at(2025, 9, 23, 19), vec![cardio_entry(&running, 1, 45)]),
    ];

    let points = daily_volume(&workouts, Period::Week, now);

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].day, day(2025, 9, 22));
    assert_approx_eq!(points[0].strength_volume, 1100.0, 1e-9);
    assert_eq!(points[1].day, day(2025, 9, 23));
    assert_eq!(points[1].strength_volume, 0.0);
  }

  #[test]
  fn test_exercise_progress_is_chronological() {
    let bench = mock_exercise(1, "Bench Press", Category::Chest);
    let squat = mock_exercise(2, "Squat", Category::Legs);
    let workouts = vec![
      mock_workout(2, at(2025, 9, 10, 10), vec![strength_entry(&bench, 3, 8, 85.0)]),
      mock_workout(1, at(2025, 9, 3, 10), vec![
        strength_entry(&bench, 3, 8, 80.0),
        strength_entry(&squat, 3, 8, 100.0),
      ]),
    ];

    let progress = exercise_progress(bench.id, &workouts);

    assert_eq!(progress.len(), 2);
    assert_eq!(progress[0].weight, 80.0);
    assert_eq!(progress[1].weight, 85.0);
    assert!(exercise_progress(99, &workouts).is_empty());
  }
}
