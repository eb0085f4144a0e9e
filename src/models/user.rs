use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identity anchor owning exercises and workouts
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
  pub id: i64,
  pub username: String,
  pub created_at: Option<NaiveDateTime>,
}
