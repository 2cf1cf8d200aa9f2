use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, StoreResult};
use crate::models::{DiaryEntry, MoodEntry, UserProfile};
use crate::store::DiaryStore;
use crate::AppState;

/// Everything the store holds, as one document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub exported_at: String,
    #[serde(default)]
    pub mood_entries: Vec<MoodEntry>,
    #[serde(default)]
    pub diary_entries: Vec<DiaryEntry>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

pub async fn collect(store: &DiaryStore) -> StoreResult<ExportData> {
    Ok(ExportData {
        exported_at: chrono::Utc::now().to_rfc3339(),
        mood_entries: store.mood_entries().await?,
        diary_entries: store.diary_entries().await?,
        profile: store.user_profile().await?,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export_data))
}

async fn export_data(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let export = collect(&state.store).await?;

    let filename = format!("mood-diary-export-{}.json", chrono::Local::now().format("%Y-%m-%d"));
    let content_disposition = format!("attachment; filename=\"{}\"", filename);

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(value) = HeaderValue::from_str(&content_disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((headers, Json(export)))
}
