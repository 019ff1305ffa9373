//! Error types surfaced by the HTTP layer.
//!
//! Every handler returns [`Result<T>`]. Store failures convert through `?`
//! and are reported to clients as a generic 500 while the details go to the
//! log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Payload parsed but failed its declared schema.
    #[error("Invalid {entity} data")]
    Validation {
        entity: &'static str,
        errors: ValidationErrors,
    },

    /// Body or query string could not be parsed at all.
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid admin password")]
    InvalidAdminPassword,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl AppError {
    pub fn validation(entity: &'static str, errors: ValidationErrors) -> Self {
        Self::Validation { entity, errors }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidAdminPassword => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
            ErrorResponse {
                message: "Internal server error".to_string(),
                errors: None,
            }
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
            let errors = match &self {
                Self::Validation { errors, .. } => serde_json::to_value(errors).ok(),
                _ => None,
            };
            ErrorResponse {
                message: self.to_string(),
                errors,
            }
        };

        (status, Json(body)).into_response()
    }
}
