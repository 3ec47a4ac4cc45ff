use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::email::MailError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Mail(MailError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Mail(err) => write!(f, "Mail Error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Mail(MailError::NotConfigured) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Server missing RESEND_API_KEY" }),
            ),
            AppError::Mail(MailError::Render(err)) => {
                tracing::error!("Email render error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Mail(err) => {
                tracing::warn!("Email delivery failed: {err}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "Email send failed", "detail": err.to_string() }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::Mail(err)
    }
}
