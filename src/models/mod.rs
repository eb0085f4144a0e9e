pub mod exercise;
pub mod snapshot;
pub mod user;
pub mod workout;

pub use exercise::{Category, Exercise, ExerciseRow};
pub use snapshot::{SkippedRecords, WorkoutSnapshot};
pub use user::User;
pub use workout::{EntryRow, Workout, WorkoutEntry, WorkoutRow};
