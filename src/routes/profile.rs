use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::UserProfile;
use crate::AppState;

#[derive(Deserialize)]
pub struct ProfileForm {
    name: String,
    avatar: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OnboardingStatus {
    needs_onboarding: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(show_profile).put(save_profile).delete(clear_profile),
        )
        .route("/onboarding", get(onboarding_status))
}

async fn show_profile(State(state): State<AppState>) -> Result<Json<UserProfile>, AppError> {
    state
        .store
        .user_profile()
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn save_profile(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<ProfileForm>,
) -> Result<Json<UserProfile>, AppError> {
    if form.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let profile = UserProfile::onboarded(&form.name, form.avatar);
    state.store.save_user_profile(&profile).await?;
    Ok(Json(profile))
}

async fn clear_profile(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.clear_user_profile().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn onboarding_status(State(state): State<AppState>) -> Result<Json<OnboardingStatus>, AppError> {
    Ok(Json(OnboardingStatus {
        needs_onboarding: state.store.needs_onboarding().await?,
    }))
}
