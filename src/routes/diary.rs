use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::AppError;
use crate::extract::{JsonBody, PathParams};
use crate::models::DiaryEntry;
use crate::AppState;

#[derive(Deserialize)]
pub struct DiaryForm {
    title: String,
    content: String,
}

fn validate_diary_form(form: &DiaryForm) -> BTreeMap<&'static str, &'static str> {
    let mut errors = BTreeMap::new();

    if form.title.trim().is_empty() {
        errors.insert("title", "Title is required");
    }

    if form.content.trim().is_empty() {
        errors.insert("content", "Content is required");
    }

    errors
}

fn check(form: &DiaryForm) -> Result<(), AppError> {
    let errors = validate_diary_form(form);
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors.into_values().collect::<Vec<_>>().join("; ");
    Err(AppError::Validation(message))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/diary", get(list_entries).post(create_entry))
        .route(
            "/diary/{id}",
            get(show_entry).put(update_entry).delete(delete_entry),
        )
}

async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<DiaryEntry>>, AppError> {
    Ok(Json(state.store.diary_entries_newest_first().await?))
}

async fn create_entry(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<DiaryForm>,
) -> Result<impl IntoResponse, AppError> {
    check(&form)?;

    let entry = DiaryEntry::new(form.title.trim().to_string(), form.content.trim().to_string());
    let stored = state.store.insert_diary_entry(entry).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn show_entry(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<DiaryEntry>, AppError> {
    state
        .store
        .diary_entry(&id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn update_entry(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
    JsonBody(form): JsonBody<DiaryForm>,
) -> Result<Json<DiaryEntry>, AppError> {
    check(&form)?;

    state
        .store
        .update_diary_entry(
            &id,
            form.title.trim().to_string(),
            form.content.trim().to_string(),
        )
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn delete_entry(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_diary_entry(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
