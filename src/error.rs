// src/error.rs

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::generator::GenerateError;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error (storage failures, malformed stored data)
    InternalServerError(String),

    // 500, missing credential or setting
    Config(String),

    // 500, the generative service failed or answered with something unusable
    Upstream(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized, with a Basic challenge for the admin area
    AuthError(String),

    // 404 Not Found
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Challenge sent with every 401.
pub const BASIC_REALM: &str = r#"Basic realm="Admin Area""#;

/// Implements `IntoResponse` for `AppError`.
/// Server-side failures keep their detail in the log and answer with a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI generation failed".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, BASIC_REALM)],
                    Json(json!({ "error": msg })),
                )
                    .into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Row not found".to_string()),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::InternalServerError(format!("template rendering failed: {:?}", err))
    }
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::MissingApiKey => AppError::Config(err.to_string()),
            other => AppError::Upstream(other.to_string()),
        }
    }
}
