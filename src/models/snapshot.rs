//! Read snapshot handed to the aggregation layer.
//!
//! Raw rows coming out of the store may be incomplete: imported workouts can
//! lack a date and entries can point at a deleted exercise. Those are resolved
//! here, once, so every aggregation function receives typed non-null records.
//! The policy is uniform: undated workouts and orphaned or malformed entries
//! are dropped and counted in [`SkippedRecords`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::exercise::{Category, Exercise};
use super::workout::{EntryRow, Workout, WorkoutEntry, WorkoutRow};

/// Counts of records dropped while building a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecords {
  /// Workouts with no date (and all of their entries)
  pub undated_workouts: usize,
  /// Entries whose exercise no longer exists
  pub orphaned_entries: usize,
  /// Entries with sets/reps below 1 or a negative weight
  pub invalid_entries: usize,
}

impl SkippedRecords {
  pub fn total(&self) -> usize {
    self.undated_workouts + self.orphaned_entries + self.invalid_entries
  }
}

/// All workouts of one user, ordered by date ascending
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutSnapshot {
  pub user_id: i64,
  pub workouts: Vec<Workout>,
  pub skipped: SkippedRecords,
}

impl WorkoutSnapshot {
  /// Resolve raw store rows into a typed snapshot
  pub fn from_rows(user_id: i64, workout_rows: Vec<WorkoutRow>, entry_rows: Vec<EntryRow>) -> Self {
    let mut skipped = SkippedRecords::default();
    let mut workouts = Vec::with_capacity(workout_rows.len());
    let mut undated_ids = Vec::new();

    for row in workout_rows {
      match row.date {
        Some(date) => workouts.push(Workout {
          id: row.id,
          date,
          notes: row.notes,
          entries: Vec::new(),
        }),
        None => {
          skipped.undated_workouts += 1;
          undated_ids.push(row.id);
        }
      }
    }

    let index: HashMap<i64, usize> = workouts
      .iter()
      .enumerate()
      .map(|(idx, w)| (w.id, idx))
      .collect();

    for row in entry_rows {
      let Some(&idx) = index.get(&row.workout_id) else {
        // Entries of undated workouts were already accounted for with their workout
        continue;
      };

      let exercise = match (row.exercise_id, row.exercise_name) {
        (Some(id), Some(name)) => Exercise {
          id,
          name,
          category: Category::parse(row.exercise_category.as_deref().unwrap_or_default()),
        },
        _ => {
          skipped.orphaned_entries += 1;
          continue;
        }
      };

      let (sets, reps) = match (u32::try_from(row.sets), u32::try_from(row.reps)) {
        (Ok(sets), Ok(reps)) if sets >= 1 && reps >= 1 => (sets, reps),
        _ => {
          skipped.invalid_entries += 1;
          continue;
        }
      };

      if !row.weight.is_finite() || row.weight < 0.0 {
        skipped.invalid_entries += 1;
        continue;
      }

      workouts[idx].entries.push(WorkoutEntry {
        id: row.id,
        exercise,
        sets,
        reps,
        weight: row.weight,
        comment: row.comment,
      });
    }

    workouts.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    if skipped.total() > 0 {
      tracing::warn!(
        user_id,
        undated_workouts = skipped.undated_workouts,
        orphaned_entries = skipped.orphaned_entries,
        invalid_entries = skipped.invalid_entries,
        ?undated_ids,
        "Skipped incomplete workout records"
      );
    }

    Self {
      user_id,
      workouts,
      skipped,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.workouts.is_empty()
  }
}
