use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Mood;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A mood recorded for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub date: String,
    pub mood: Mood,
    pub affirmation: String,
    pub created_at: String,
}

impl MoodEntry {
    pub fn new(date: NaiveDate, mood: &Mood, affirmation: String) -> Self {
        let date = date.format(DATE_FORMAT).to_string();
        Self {
            id: format!("{}-{}", date, mood.id),
            date,
            mood: mood.clone(),
            affirmation,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Calendar day of the entry, if the stored string is well formed.
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    pub fn share_message(&self) -> String {
        format!(
            "Today I'm feeling {}: \"{}\"",
            self.mood.name.to_lowercase(),
            self.affirmation
        )
    }
}
