mod dto;
pub mod handlers;
pub mod model;
mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use model::DailyMeals;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
