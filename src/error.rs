//! Route-boundary error type.
//!
//! Handlers return `Result<_, AppError>`; every variant renders as a JSON
//! `{"error": ...}` body with the matching status code.

use crate::provider::ProviderError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing client input (400).
    #[error("{0}")]
    Validation(String),

    /// No signed-in user in the session (401).
    #[error("Authentication required")]
    Unauthorized,

    /// The auth provider failed (500). The provider's message is passed through.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The session store failed (500).
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Can't extract session. Is `SessionManagerLayer` enabled?")]
    SessionLayerMissing,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Provider(_) | AppError::Session(_) | AppError::SessionLayerMissing => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Session(_) | AppError::SessionLayerMissing = &self {
            tracing::error!(error = %self, "Session store failure");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
