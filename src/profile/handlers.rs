use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{
    dto::ProfileUpdate,
    goals::GoalSummary,
    model::{CustomGoals, Profile},
    services,
};
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/profile/goals", get(get_goals).put(set_custom_goals))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Profile>, AppError> {
    let mut profile = services::load_profile(state.store.as_ref(), user.id).await?;
    if profile.name.is_none() {
        profile.name = user.name;
    }
    Ok(Json(profile))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(
        services::update_profile(state.store.as_ref(), user.id, body).await?,
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_goals(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<GoalSummary>, AppError> {
    Ok(Json(services::goal_summary(state.store.as_ref(), user.id).await?))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn set_custom_goals(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CustomGoals>,
) -> Result<Json<GoalSummary>, AppError> {
    Ok(Json(
        services::set_custom_goals(state.store.as_ref(), user.id, body).await?,
    ))
}
