use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{CalorieProgress, NewMeal},
    model::DailyMeals,
    services,
};
use crate::{
    auth::AuthUser, calendar::parse_date_key, error::AppError, state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals/today", get(get_today))
        .route("/meals/today/progress", get(get_today_progress))
        .route("/meals/day/:date", get(get_day))
}

/// Writes always target today in the reference timezone.
pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(add_meal))
        .route("/meals/:id", put(replace_meal).delete(remove_meal))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_today(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DailyMeals>, AppError> {
    let today = state.calendar.today();
    Ok(Json(
        services::load_day(state.store.as_ref(), user.id, today).await?,
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_day(
    State(state): State<AppState>,
    user: AuthUser,
    Path(date): Path<String>,
) -> Result<Json<DailyMeals>, AppError> {
    let date = parse_date_key(&date)?;
    Ok(Json(
        services::load_day(state.store.as_ref(), user.id, date).await?,
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_today_progress(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<CalorieProgress>, AppError> {
    let today = state.calendar.today();
    Ok(Json(
        services::progress(state.store.as_ref(), user.id, today).await?,
    ))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn add_meal(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<NewMeal>,
) -> Result<(StatusCode, Json<DailyMeals>), AppError> {
    let today = state.calendar.today();
    let day = services::add_meal(state.store.as_ref(), user.id, today, body).await?;
    Ok((StatusCode::CREATED, Json(day)))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn replace_meal(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<NewMeal>,
) -> Result<Json<DailyMeals>, AppError> {
    let today = state.calendar.today();
    Ok(Json(
        services::replace_meal(state.store.as_ref(), user.id, today, id, body).await?,
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove_meal(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DailyMeals>, AppError> {
    let today = state.calendar.today();
    Ok(Json(
        services::remove_meal(state.store.as_ref(), user.id, today, id).await?,
    ))
}
