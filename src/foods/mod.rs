mod dto;
pub mod handlers;
pub mod model;
mod repo;
pub mod seed;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use model::Food;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
