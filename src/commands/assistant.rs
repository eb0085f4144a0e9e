//! Coach assistant commands

use chrono::NaiveDateTime;

use super::load_user_snapshot;
use crate::assistant::{generate_insights, reply, ChatMessage, Insight};
use crate::db::AppState;
use crate::error::Result;

pub async fn get_insights(state: &AppState, user_id: i64, now: NaiveDateTime) -> Result<Vec<Insight>> {
  let snapshot = load_user_snapshot(state, user_id).await?;
  let insights = generate_insights(&snapshot.workouts, now);

  tracing::info!(user_id, count = insights.len(), "Generated insights");
  Ok(insights)
}

/// Answer one chat message. The caller keeps the conversation history.
pub async fn send_chat_message(
  state: &AppState,
  user_id: i64,
  message: &str,
  now: NaiveDateTime,
) -> Result<ChatMessage> {
  let snapshot = load_user_snapshot(state, user_id).await?;
  let response = reply(message, &snapshot.workouts, now);

  tracing::debug!(user_id, kind = ?response.kind, "Answered chat message");
  Ok(response)
}
