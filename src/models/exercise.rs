use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Muscle-group category of an exercise.
///
/// The app stores categories as free text (usually a localized display name),
/// so parsing is lenient: anything unrecognized lands in `Other` with the raw
/// text preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Chest,
  Back,
  Legs,
  Shoulders,
  Arms,
  Abs,
  Cardio,
  Other(String),
}

impl Category {
  /// Parse a stored category, accepting English and Russian names in any case
  pub fn parse(raw: &str) -> Self {
    match raw.trim().to_lowercase().as_str() {
      "chest" | "грудь" => Category::Chest,
      "back" | "спина" => Category::Back,
      "legs" | "ноги" => Category::Legs,
      "shoulders" | "плечи" => Category::Shoulders,
      "arms" | "руки" => Category::Arms,
      "abs" | "пресс" => Category::Abs,
      "cardio" | "кардио" => Category::Cardio,
      _ => Category::Other(raw.trim().to_string()),
    }
  }

  pub fn is_cardio(&self) -> bool {
    matches!(self, Category::Cardio)
  }

  pub fn as_str(&self) -> &str {
    match self {
      Category::Chest => "chest",
      Category::Back => "back",
      Category::Legs => "legs",
      Category::Shoulders => "shoulders",
      Category::Arms => "arms",
      Category::Abs => "abs",
      Category::Cardio => "cardio",
      Category::Other(raw) => raw,
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A named movement, resolved from the store with a typed category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
  pub id: i64,
  pub name: String,
  pub category: Category,
}

impl Exercise {
  pub fn is_cardio(&self) -> bool {
    self.category.is_cardio()
  }
}

/// Raw exercise row as stored
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExerciseRow {
  pub id: i64,
  pub user_id: i64,
  pub name: String,
  pub category: String,
  pub created_at: Option<NaiveDateTime>,
}

impl From<ExerciseRow> for Exercise {
  fn from(row: ExerciseRow) -> Self {
    Self {
      id: row.id,
      name: row.name,
      category: Category::parse(&row.category),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_category_parse_is_case_insensitive() {
    assert_eq!(Category::parse("Cardio"), Category::Cardio);
    assert_eq!(Category::parse("CARDIO"), Category::Cardio);
    assert_eq!(Category::parse("Кардио"), Category::Cardio);
    assert_eq!(Category::parse("кардио"), Category::Cardio);
    assert_eq!(Category::parse(" Грудь "), Category::Chest);
    assert_eq!(Category::parse("legs"), Category::Legs);
  }

  #[test]
  fn test_unknown_category_falls_back_to_other() {
    let category = Category::parse("Stretching");
    assert_eq!(category, Category::Other("Stretching".to_string()));
    assert!(!category.is_cardio());
    assert_eq!(category.as_str(), "Stretching");
  }
}
