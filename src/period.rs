//! Calendar-relative reporting windows
//!
//! Windows are computed by calendar-component subtraction, not fixed day
//! counts: one month before March 31 is the last day of February.

use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Period {
  #[default]
  Week,
  Month,
  Year,
  All,
}

impl Period {
  /// Step `now` back by `units` periods. `None` for `All`.
  fn shift_back(&self, now: NaiveDateTime, units: u32) -> Option<NaiveDateTime> {
    let shifted = match self {
      Period::Week => now.checked_sub_days(Days::new(7 * units as u64)),
      Period::Month => now.checked_sub_months(Months::new(units)),
      Period::Year => now.checked_sub_months(Months::new(12 * units)),
      Period::All => return None,
    };
    // Underflow only happens near the calendar's lower bound
    Some(shifted.unwrap_or(NaiveDateTime::MIN))
  }

  /// Inclusive lower bound of the current window, `None` when unbounded
  pub fn window_start(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
    self.shift_back(now, 1)
  }

  /// Half-open `[start, end)` window immediately preceding the current one
  pub fn previous_window(&self, now: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let end = self.shift_back(now, 1)?;
    let start = self.shift_back(now, 2)?;
    Some((start, end))
  }

  /// Whether `date` falls into the current window
  pub fn contains(&self, date: NaiveDateTime, now: NaiveDateTime) -> bool {
    match self.window_start(now) {
      Some(start) => date >= start,
      None => true,
    }
  }

  /// Number of trailing calendar days shown in the activity heatmap
  pub fn heatmap_days(&self) -> u32 {
    match self {
      Period::Week => 7,
      Period::Month => 30,
      Period::Year | Period::All => 180,
    }
  }

  /// Calendar days of the heatmap window, oldest first, ending at `today`
  pub fn heatmap_window(&self, today: NaiveDate) -> Vec<NaiveDate> {
    (0..self.heatmap_days() as u64)
      .rev()
      .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
      .collect()
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Period::Week => "week",
      Period::Month => "month",
      Period::Year => "year",
      Period::All => "all",
    }
  }
}

impl std::fmt::Display for Period {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Period {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "week" => Ok(Self::Week),
      "month" => Ok(Self::Month),
      "year" => Ok(Self::Year),
      "all" => Ok(Self::All),
      _ => Err(format!("Unknown period: {}", s)),
    }
  }
}
