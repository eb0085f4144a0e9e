//! Rule-driven coach assistant
//!
//! Insights and chat replies are computed deterministically from the same
//! statistics the progress screens show. There is no language model behind
//! this: messages are matched to a small set of intents by keyword.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::achievements::{evaluate_catalog, summarize, AchievementMetrics, ACHIEVEMENT_CATALOG};
use crate::models::{Category, Workout};
use crate::period::Period;
use crate::stats::{compute_stats, workouts_in_period};

/// Relative weekly volume change that triggers a progress or warning insight
const VOLUME_CHANGE_THRESHOLD_PCT: f64 = 10.0;
/// Consecutive training days after which a rest day is suggested
const RECOVERY_STREAK_DAYS: u32 = 6;
/// Locked achievements at or above this completion get a nudge
const NEAR_ACHIEVEMENT_FRACTION: f64 = 0.8;
const MAX_ACHIEVEMENT_NUDGES: usize = 3;
/// Suggested load increase when a lift has stalled
const PLATEAU_INCREMENT_KG: f64 = 2.5;
const PLATEAU_MIN_SESSIONS: usize = 3;

/// ---------------------------------------------------------------------------
/// Insights
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
  Progress,
  Warning,
  Recommendation,
  Achievement,
  Recovery,
}

/// Declared highest first so sorting puts urgent insights on top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
  High,
  Medium,
  Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
  pub kind: InsightKind,
  pub priority: Priority,
  pub title: String,
  pub description: String,
}

impl Insight {
  fn new(kind: InsightKind, priority: Priority, title: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      kind,
      priority,
      title: title.into(),
      description: description.into(),
    }
  }
}

/// Derive coaching insights from the full history, most urgent first
pub fn generate_insights(workouts: &[Workout], now: NaiveDateTime) -> Vec<Insight> {
  let mut insights = Vec::new();

  if workouts.is_empty() {
    insights.push(Insight::new(
      InsightKind::Recommendation,
      Priority::Medium,
      "Log your first workout",
      "Add a session with a few exercises to start tracking progress.",
    ));
    return insights;
  }

  let week = compute_stats(workouts, Period::Week, now);

  if week.workout_count == 0 {
    insights.push(Insight::new(
      InsightKind::Warning,
      Priority::High,
      "No workouts this week",
      "You haven't trained in the last 7 days. Even a short session keeps the habit going.",
    ));
  }

  let previous_volume = week.total_strength_volume - week.delta.strength_volume;
  if previous_volume > 0.0 {
    let change_pct = week.delta.strength_volume / previous_volume * 100.0;
    if change_pct >= VOLUME_CHANGE_THRESHOLD_PCT {
      insights.push(Insight::new(
        InsightKind::Progress,
        Priority::High,
        "Great progress",
        format!("Your training volume grew {:.0}% over the last week. Keep it up!", change_pct),
      ));
    } else if change_pct <= -VOLUME_CHANGE_THRESHOLD_PCT {
      insights.push(Insight::new(
        InsightKind::Warning,
        Priority::Medium,
        "Volume is dropping",
        format!("Your training volume fell {:.0}% compared to the week before.", change_pct.abs()),
      ));
    }
  }

  if let Some(days) = active_streak(workouts, now.date()) {
    if days >= RECOVERY_STREAK_DAYS {
      insights.push(Insight::new(
        InsightKind::Recovery,
        Priority::High,
        "Don't forget to recover",
        format!("You've trained {} days in a row. A rest day helps you grow.", days),
      ));
    }
  }

  for plateau in find_plateaus(workouts, now) {
    insights.push(Insight::new(
      InsightKind::Recommendation,
      Priority::Medium,
      "Time to add weight",
      format!(
        "{} has stayed at {:.1} kg for {} sessions. Try adding {:.1} kg.",
        plateau.exercise_name, plateau.weight, plateau.sessions, PLATEAU_INCREMENT_KG
      ),
    ));
  }

  let metrics = AchievementMetrics::collect(workouts, now);
  let mut near: Vec<_> = evaluate_catalog(ACHIEVEMENT_CATALOG, &metrics)
    .into_iter()
    .filter(|s| !s.unlocked && s.fraction() >= NEAR_ACHIEVEMENT_FRACTION)
    .collect();
  near.sort_by(|a, b| b.fraction().total_cmp(&a.fraction()));
  for status in near.into_iter().take(MAX_ACHIEVEMENT_NUDGES) {
    insights.push(Insight::new(
      InsightKind::Achievement,
      Priority::Low,
      "Almost there",
      format!("{}: {} / {}", status.id, status.progress, status.max_progress),
    ));
  }

  // Stable sort keeps rule order within a priority
  insights.sort_by_key(|i| i.priority);
  insights
}

/// Length of the streak if it is still alive (last workout today or yesterday)
fn active_streak(workouts: &[Workout], today: NaiveDate) -> Option<u32> {
  let latest = workouts.iter().map(|w| w.day()).max()?;
  if (today - latest).num_days() > 1 {
    return None;
  }
  Some(crate::achievements::compute_streaks(workouts).current_streak_days)
}

#[derive(Debug, Clone, PartialEq)]
struct Plateau {
  exercise_name: String,
  weight: f64,
  sessions: usize,
}

/// Heaviest weight per workout for one exercise, oldest first.
/// Several entries of the same exercise in one workout are one session.
fn session_weights(exercise_id: i64, workouts: &[Workout]) -> Vec<f64> {
  let mut sessions: Vec<(NaiveDateTime, i64, f64)> = workouts
    .iter()
    .filter_map(|w| {
      w.entries
        .iter()
        .filter(|e| e.exercise.id == exercise_id)
        .map(|e| e.weight)
        .reduce(f64::max)
        .map(|weight| (w.date, w.id, weight))
    })
    .collect();

  sessions.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
  sessions.into_iter().map(|(_, _, weight)| weight).collect()
}

/// Strength exercises whose latest session weight in the last month is no higher than the first
fn find_plateaus(workouts: &[Workout], now: NaiveDateTime) -> Vec<Plateau> {
  let recent: Vec<Workout> = workouts_in_period(workouts, Period::Month, now).cloned().collect();

  let mut names: HashMap<i64, &str> = HashMap::new();
  for workout in &recent {
    for entry in workout.entries.iter().filter(|e| !e.is_cardio() && e.weight > 0.0) {
      names.entry(entry.exercise.id).or_insert(entry.exercise.name.as_str());
    }
  }

  let mut plateaus: Vec<_> = names
    .into_iter()
    .filter_map(|(exercise_id, name)| {
      let sessions = session_weights(exercise_id, &recent);
      let (first, last) = (*sessions.first()?, *sessions.last()?);
      if sessions.len() >= PLATEAU_MIN_SESSIONS && last <= first {
        Some(Plateau {
          exercise_name: name.to_string(),
          weight: last,
          sessions: sessions.len(),
        })
      } else {
        None
      }
    })
    .collect();

  plateaus.sort_by(|a, b| a.exercise_name.cmp(&b.exercise_name));
  plateaus
}

/// ---------------------------------------------------------------------------
/// Chat
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
  Text,
  Insight,
  Recommendation,
  WorkoutPlan,
  Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub content: String,
  pub is_user: bool,
  pub timestamp: NaiveDateTime,
  pub kind: MessageKind,
}

impl ChatMessage {
  pub fn user(content: impl Into<String>, timestamp: NaiveDateTime) -> Self {
    Self {
      content: content.into(),
      is_user: true,
      timestamp,
      kind: MessageKind::Text,
    }
  }

  fn coach(content: impl Into<String>, timestamp: NaiveDateTime, kind: MessageKind) -> Self {
    Self {
      content: content.into(),
      is_user: false,
      timestamp,
      kind,
    }
  }

  pub fn welcome(timestamp: NaiveDateTime) -> Self {
    Self::coach(
      "Hi! I'm your personal coach. I can help with your training, progress analysis and motivation! 💪",
      timestamp,
      MessageKind::Text,
    )
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAction {
  WeeklyAnalysis,
  NextWorkout,
  Plateau,
  Nutrition,
  Motivation,
}

impl QuickAction {
  pub const ALL: [QuickAction; 5] = [
    QuickAction::WeeklyAnalysis,
    QuickAction::NextWorkout,
    QuickAction::Plateau,
    QuickAction::Nutrition,
    QuickAction::Motivation,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      QuickAction::WeeklyAnalysis => "Weekly analysis",
      QuickAction::NextWorkout => "Next workout",
      QuickAction::Plateau => "Why am I not progressing?",
      QuickAction::Nutrition => "Nutrition tip",
      QuickAction::Motivation => "Motivation",
    }
  }

  /// Message sent on the user's behalf when the quick action is tapped
  pub fn prompt(&self) -> &'static str {
    match self {
      QuickAction::WeeklyAnalysis => "Analyze my workouts for the last week",
      QuickAction::NextWorkout => "What should I do in my next workout?",
      QuickAction::Plateau => "Why is my bench press not progressing?",
      QuickAction::Nutrition => "Give me a nutrition tip for gaining mass",
      QuickAction::Motivation => "I need motivation to train",
    }
  }

  /// Match free text to an intent. Checked in a fixed order so the more
  /// specific intents win ("not progressing this week" is a plateau question).
  pub fn detect(message: &str) -> Option<Self> {
    const KEYWORDS: [(QuickAction, &[&str]); 5] = [
      (QuickAction::Plateau, &["plateau", "stall", "not progress", "not growing", "не растет", "не растёт"]),
      (QuickAction::Nutrition, &["nutrition", "diet", "food", "protein", "питани"]),
      (QuickAction::Motivation, &["motivat", "мотивац"]),
      (QuickAction::NextWorkout, &["next", "следующ"]),
      (QuickAction::WeeklyAnalysis, &["week", "недел"]),
    ];

    let text = message.to_lowercase();
    KEYWORDS
      .iter()
      .find(|(_, words)| words.iter().any(|w| text.contains(w)))
      .map(|(action, _)| *action)
  }
}

/// Answer a user message from the workout history
pub fn reply(message: &str, workouts: &[Workout], now: NaiveDateTime) -> ChatMessage {
  match QuickAction::detect(message) {
    Some(QuickAction::WeeklyAnalysis) => weekly_analysis(workouts, now),
    Some(QuickAction::NextWorkout) => next_workout(workouts, now),
    Some(QuickAction::Plateau) => plateau_advice(message, workouts, now),
    Some(QuickAction::Nutrition) => ChatMessage::coach(
      "Aim for roughly 1.6–2.2 g of protein per kg of bodyweight and a small calorie surplus. \
       Spread protein over 3–5 meals and keep a carb-rich meal around your workout.",
      now,
      MessageKind::Recommendation,
    ),
    Some(QuickAction::Motivation) => motivation(workouts, now),
    None => {
      let options: Vec<_> = QuickAction::ALL.iter().map(|a| a.label()).collect();
      ChatMessage::coach(
        format!("I can help with: {}.", options.join(", ")),
        now,
        MessageKind::Text,
      )
    }
  }
}

fn weekly_analysis(workouts: &[Workout], now: NaiveDateTime) -> ChatMessage {
  let stats = compute_stats(workouts, Period::Week, now);
  if stats.workout_count == 0 {
    return ChatMessage::coach(
      "No workouts in the last 7 days yet. Log a session and I'll break it down for you.",
      now,
      MessageKind::Analysis,
    );
  }

  let content = format!(
    "Last 7 days: {} workouts, {} sets, {} reps, {:.0} kg lifted and {} cardio minutes. \
     Volume vs the previous week: {:+.0} kg.",
    stats.workout_count,
    stats.total_sets,
    stats.total_reps,
    stats.total_strength_volume,
    stats.total_cardio_minutes,
    stats.delta.strength_volume,
  );
  ChatMessage::coach(content, now, MessageKind::Analysis)
}

/// Suggest the strength category trained least recently
fn next_workout(workouts: &[Workout], now: NaiveDateTime) -> ChatMessage {
  let mut last_trained: HashMap<Category, NaiveDate> = HashMap::new();
  for workout in workouts {
    for entry in workout.entries.iter().filter(|e| !e.is_cardio()) {
      let day = last_trained.entry(entry.exercise.category.clone()).or_insert(workout.day());
      if workout.day() > *day {
        *day = workout.day();
      }
    }
  }

  let stalest = last_trained
    .into_iter()
    .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

  let content = match stalest {
    Some((category, day)) => format!(
      "Your {} work is the least recent (last trained {}). Make it the focus of your next session.",
      category, day
    ),
    None => "Start with a full-body session: a squat, a press and a row, 3 sets of 8–10 each.".to_string(),
  };
  ChatMessage::coach(content, now, MessageKind::WorkoutPlan)
}

/// Advice for the exercise named in the message, or the most-logged one
fn plateau_advice(message: &str, workouts: &[Workout], now: NaiveDateTime) -> ChatMessage {
  let text = message.to_lowercase();
  let mut counts: HashMap<i64, (String, usize)> = HashMap::new();
  for entry in workouts.iter().flat_map(|w| &w.entries).filter(|e| !e.is_cardio()) {
    counts
      .entry(entry.exercise.id)
      .or_insert_with(|| (entry.exercise.name.clone(), 0))
      .1 += 1;
  }

  // Longest match wins so "incline bench press" beats "bench press"
  let mentioned = counts
    .iter()
    .filter(|(_, (name, _))| text.contains(&name.to_lowercase()))
    .max_by(|a, b| {
      a.1 .0
        .chars()
        .count()
        .cmp(&b.1 .0.chars().count())
        .then_with(|| b.1 .0.cmp(&a.1 .0))
    })
    .map(|(id, (name, _))| (*id, name.clone()));
  let target = mentioned.or_else(|| {
    counts
      .iter()
      .max_by(|a, b| a.1 .1.cmp(&b.1 .1).then_with(|| b.1 .0.cmp(&a.1 .0)))
      .map(|(id, (name, _))| (*id, name.clone()))
  });

  let Some((exercise_id, name)) = target else {
    return ChatMessage::coach(
      "Log a few strength sessions first so I can see how your lifts are moving.",
      now,
      MessageKind::Recommendation,
    );
  };

  let recent: Vec<Workout> = workouts_in_period(workouts, Period::Month, now).cloned().collect();
  let sessions = session_weights(exercise_id, &recent);
  let content = match (sessions.first(), sessions.last()) {
    (Some(first), Some(last)) if sessions.len() >= PLATEAU_MIN_SESSIONS && last <= first => format!(
      "{} has been stuck at {:.1} kg over the last month. Add {:.1} kg, or keep the weight and add a rep per set \
       each session, and make sure you sleep and eat enough to recover.",
      name, last, PLATEAU_INCREMENT_KG
    ),
    (Some(first), Some(last)) if last > first => format!(
      "{} is moving: {:.1} kg → {:.1} kg this month. Stay consistent.",
      name, first, last
    ),
    _ => format!(
      "There isn't enough recent {} data to judge. Log it for a few more sessions.",
      name
    ),
  };
  ChatMessage::coach(content, now, MessageKind::Recommendation)
}

fn motivation(workouts: &[Workout], now: NaiveDateTime) -> ChatMessage {
  let metrics = AchievementMetrics::collect(workouts, now);
  let summary = summarize(&evaluate_catalog(ACHIEVEMENT_CATALOG, &metrics));
  let streak = active_streak(workouts, now.date()).unwrap_or(0);

  let content = if metrics.total_workouts == 0 {
    "Every journey starts with one session. Log your first workout today!".to_string()
  } else {
    format!(
      "You've logged {} workouts and unlocked {} of {} achievements. Current streak: {} days. \
       Show up today and keep building!",
      metrics.total_workouts, summary.unlocked, summary.total, streak
    )
  };
  ChatMessage::coach(content, now, MessageKind::Text)
}
