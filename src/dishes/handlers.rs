use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{DishFilter, DishUpdate, NewDish},
    model::Dish,
    services,
};
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dishes", get(list_dishes).post(create_dish))
        .route(
            "/dishes/:id",
            get(get_dish).put(update_dish).delete(delete_dish),
        )
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_dishes(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<DishFilter>,
) -> Result<Json<Vec<Dish>>, AppError> {
    Ok(Json(
        services::list_dishes(state.store.as_ref(), user.id, &filter).await?,
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_dish(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Dish>, AppError> {
    Ok(Json(services::get_dish(state.store.as_ref(), user.id, id).await?))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn create_dish(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<NewDish>,
) -> Result<(StatusCode, Json<Dish>), AppError> {
    let dish = services::create_dish(state.store.as_ref(), user.id, body).await?;
    Ok((StatusCode::CREATED, Json(dish)))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn update_dish(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<DishUpdate>,
) -> Result<Json<Dish>, AppError> {
    Ok(Json(
        services::update_dish(state.store.as_ref(), user.id, id, body).await?,
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_dish(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    services::delete_dish(state.store.as_ref(), user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
