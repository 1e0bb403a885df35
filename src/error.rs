use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by every service and handler.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("unit `{unit}` is not available for {food}")]
    UnitNotFound { food: String, unit: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("servings must be at least 1 (got {0})")]
    InvalidServings(i64),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("{0} belongs to another user")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("malformed {collection} document `{key}`: {reason}")]
    Decode {
        collection: &'static str,
        key: String,
        reason: String,
    },

    #[error("persistence failure: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnitNotFound { .. }
            | AppError::InvalidInput(_)
            | AppError::InvalidServings(_) => StatusCode::BAD_REQUEST,
            AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Decode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Persistence(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Persistence(e) => {
                error!(error = %e, "store call failed");
                "Storage is temporarily unavailable, please retry".to_string()
            }
            AppError::Decode { .. } => {
                error!(error = %self, "stored document rejected");
                "Stored data could not be read".to_string()
            }
            other => {
                warn!(error = %other, %status, "request rejected");
                other.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
