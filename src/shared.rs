use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::player::repository::PlayerRepository;
use crate::ranking::repository::GameRecordRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub game_record_repository: Arc<dyn GameRecordRepository + Send + Sync>,
    pub player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    /// Honour X-Forwarded-For / X-Real-IP when resolving the caller's address
    pub trust_proxy_headers: bool,
}

impl AppState {
    pub fn new(
        game_record_repository: Arc<dyn GameRecordRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    ) -> Self {
        Self {
            game_record_repository,
            player_repository,
            trust_proxy_headers: false,
        }
    }

    pub fn with_trust_proxy_headers(mut self, trust: bool) -> Self {
        self.trust_proxy_headers = trust;
        self
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation failed", msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "invalid request body", msg),
            AppError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error",
                format!("Database error: {}", msg),
            ),
        };

        let body = Json(json!({
            "msg": msg,
            "error": error_message
        }));

        (status, body).into_response()
    }
}
