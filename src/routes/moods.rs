use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extract::{JsonBody, PathParams};
use crate::models::{moods, Mood, MoodEntry, DATE_FORMAT};
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntryForm {
    mood_id: String,
    date: Option<String>,
    affirmation: Option<String>,
}

#[derive(Serialize)]
pub struct ShareMessage {
    message: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/moods", get(list_moods))
        .route("/moods/{id}", get(show_mood))
        .route("/mood-entries", get(list_mood_entries).post(save_mood_entry))
        .route("/mood-entries/{date}", get(show_mood_entry))
        .route("/mood-entries/{date}/share", get(share_mood_entry))
        .route("/calendar/{year}/{month}", get(calendar_month))
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("Date must be YYYY-MM-DD, got '{value}'")))
}

async fn list_moods() -> Json<&'static [Mood]> {
    Json(moods::catalog())
}

async fn show_mood(PathParams(id): PathParams<String>) -> Result<Json<Mood>, AppError> {
    moods::find(&id).cloned().map(Json).ok_or(AppError::NotFound)
}

async fn list_mood_entries(State(state): State<AppState>) -> Result<Json<Vec<MoodEntry>>, AppError> {
    Ok(Json(state.store.mood_entries().await?))
}

async fn save_mood_entry(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<MoodEntryForm>,
) -> Result<Json<MoodEntry>, AppError> {
    let mood = moods::find(&form.mood_id)
        .ok_or_else(|| AppError::Validation(format!("Unknown mood '{}'", form.mood_id)))?;

    let date = match form.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => Utc::now().date_naive(),
    };

    let affirmation = match form.affirmation {
        Some(a) if !a.trim().is_empty() => a,
        _ => mood.random_affirmation().unwrap_or_default().to_string(),
    };

    let entry = MoodEntry::new(date, mood, affirmation);
    state.store.save_mood_entry(entry.clone()).await?;
    Ok(Json(entry))
}

async fn show_mood_entry(
    State(state): State<AppState>,
    PathParams(date): PathParams<String>,
) -> Result<Json<MoodEntry>, AppError> {
    let date = parse_date(&date)?.format(DATE_FORMAT).to_string();
    state
        .store
        .mood_entry_by_date(&date)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn share_mood_entry(
    State(state): State<AppState>,
    PathParams(date): PathParams<String>,
) -> Result<Json<ShareMessage>, AppError> {
    let date = parse_date(&date)?.format(DATE_FORMAT).to_string();
    let entry = state
        .store
        .mood_entry_by_date(&date)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ShareMessage {
        message: entry.share_message(),
    }))
}

async fn calendar_month(
    State(state): State<AppState>,
    PathParams((year, month)): PathParams<(i32, u32)>,
) -> Result<Json<Vec<MoodEntry>>, AppError> {
    if !(1..=12).contains(&month) {
        return Err(AppError::Validation("Month must be between 1 and 12".to_string()));
    }

    Ok(Json(state.store.mood_entries_in_month(year, month).await?))
}
