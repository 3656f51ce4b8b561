//! services/api/src/web/error.rs
//!
//! Request-level failures and their HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;
use tutorhub_core::ports::PortError;

use crate::token::TokenError;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Missing or invalid credential.
    #[error("unauthorized access")]
    Unauthorized,

    /// Authenticated, but acting on another identity.
    #[error("forbidden access")]
    Forbidden,

    /// A mutation matched no document.
    #[error("{0}")]
    NotFound(String),

    #[error("Store failure: {0}")]
    Store(#[from] PortError),

    #[error("Token failure: {0}")]
    Token(#[from] TokenError),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "unauthorized access" })),
            )
                .into_response(),
            HttpError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "forbidden access" })),
            )
                .into_response(),
            HttpError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
            HttpError::Store(e) => {
                error!("Store operation failed: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
                    .into_response()
            }
            HttpError::Token(e) => {
                error!("Failed to issue token: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue token".to_string())
                    .into_response()
            }
        }
    }
}
