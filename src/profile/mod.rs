mod dto;
pub mod goals;
pub mod handlers;
pub mod model;
mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use goals::DailyGoals;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
