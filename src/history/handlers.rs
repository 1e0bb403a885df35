use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::{
    model::{DayStats, History},
    services::{self, DEFAULT_DAYS},
};
use crate::{auth::AuthUser, calendar::parse_date_key, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<u32>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(get_history))
        .route("/history/:date", get(get_day))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<History>, AppError> {
    let today = state.calendar.today();
    let days = query.days.unwrap_or(DEFAULT_DAYS);
    Ok(Json(
        services::load_history(state.store.as_ref(), user.id, today, days).await?,
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_day(
    State(state): State<AppState>,
    user: AuthUser,
    Path(date): Path<String>,
) -> Result<Json<DayStats>, AppError> {
    let date = parse_date_key(&date)?;
    Ok(Json(
        services::load_day_stats(state.store.as_ref(), user.id, date).await?,
    ))
}
