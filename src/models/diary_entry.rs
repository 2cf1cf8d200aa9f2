use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DiaryEntry {
    /// New entry keyed by the creation time in epoch milliseconds.
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        let stamp = now.to_rfc3339();
        Self {
            id: now.timestamp_millis().to_string(),
            title,
            content,
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }
}
