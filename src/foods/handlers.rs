use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{FoodFilter, FoodUpdate, NewFood, NutritionQuery, NutritionResponse},
    model::Food,
    services,
};
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route(
            "/foods/:id",
            get(get_food).put(update_food).delete(delete_food),
        )
        .route("/foods/:id/nutrition", post(calculate_nutrition))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_foods(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<FoodFilter>,
) -> Result<Json<Vec<Food>>, AppError> {
    let foods = services::list_foods(state.store.as_ref(), user.id, &filter).await?;
    Ok(Json(foods))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_food(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Food>, AppError> {
    Ok(Json(services::get_food(state.store.as_ref(), user.id, id).await?))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn create_food(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<NewFood>,
) -> Result<(StatusCode, Json<Food>), AppError> {
    let food = services::create_food(state.store.as_ref(), user.id, body).await?;
    Ok((StatusCode::CREATED, Json(food)))
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn update_food(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<FoodUpdate>,
) -> Result<Json<Food>, AppError> {
    Ok(Json(
        services::update_food(state.store.as_ref(), user.id, id, body).await?,
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_food(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    services::delete_food(state.store.as_ref(), user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /foods/:id/nutrition { quantity, unit }
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn calculate_nutrition(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<NutritionQuery>,
) -> Result<Json<NutritionResponse>, AppError> {
    let food = services::get_food(state.store.as_ref(), user.id, id).await?;
    let nutrition = food.nutrition_for(body.quantity, &body.unit)?;
    Ok(Json(NutritionResponse {
        quantity: body.quantity,
        unit: body.unit,
        nutrition,
    }))
}
