use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::exercise::Exercise;

/// One logged exercise inside a workout.
///
/// For cardio exercises `reps` holds minutes and `weight` is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
  pub id: i64,
  pub exercise: Exercise,
  pub sets: u32,
  pub reps: u32,
  pub weight: f64,
  pub comment: Option<String>,
}

impl WorkoutEntry {
  pub fn is_cardio(&self) -> bool {
    self.exercise.is_cardio()
  }

  /// weight × sets × reps, zero for cardio
  pub fn strength_volume(&self) -> f64 {
    if self.is_cardio() {
      0.0
    } else {
      self.weight * self.sets as f64 * self.reps as f64
    }
  }

  /// reps × sets, zero for strength entries
  pub fn cardio_minutes(&self) -> u64 {
    if self.is_cardio() {
      self.sets as u64 * self.reps as u64
    } else {
      0
    }
  }

  /// sets × reps for every entry. Cardio counts its minutes here too.
  pub fn reps_performed(&self) -> u64 {
    self.sets as u64 * self.reps as u64
  }

  /// Activity score used by the heatmap: sets × reps for strength, minutes for cardio
  pub fn activity_score(&self) -> u64 {
    if self.is_cardio() {
      self.reps as u64
    } else {
      self.sets as u64 * self.reps as u64
    }
  }
}

/// One training session with its entries already resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
  pub id: i64,
  pub date: NaiveDateTime,
  pub notes: Option<String>,
  pub entries: Vec<WorkoutEntry>,
}

impl Workout {
  /// Calendar day the workout belongs to
  pub fn day(&self) -> NaiveDate {
    self.date.date()
  }
}

/// Raw workout row as stored (date may be missing in imported data)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutRow {
  pub id: i64,
  pub user_id: i64,
  pub date: Option<NaiveDateTime>,
  pub notes: Option<String>,
}

/// Raw entry row joined with its exercise; exercise columns are NULL for orphans
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EntryRow {
  pub id: i64,
  pub workout_id: i64,
  pub exercise_id: Option<i64>,
  pub exercise_name: Option<String>,
  pub exercise_category: Option<String>,
  pub sets: i64,
  pub reps: i64,
  pub weight: f64,
  pub comment: Option<String>,
}
