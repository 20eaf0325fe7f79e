use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::fields::FieldCountError;
use crate::intake::pdf::ExtractError;
use crate::llm_client::LlmError;

/// Shown when a submission is missing one of the four inputs.
pub const MISSING_INPUTS_WARNING: &str = "Please upload a PDF document, enter the disaster article, \
    upload a client logo, and enter the yearly budget before submitting.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", MISSING_INPUTS_WARNING)]
    MissingInputs,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid form data: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("{0}")]
    Extract(#[from] ExtractError),

    #[error("{0}")]
    FieldCount(#[from] FieldCountError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::MissingInputs => (StatusCode::BAD_REQUEST, "MISSING_INPUTS"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Multipart(_) => (StatusCode::BAD_REQUEST, "INVALID_FORM"),
            AppError::InvalidSession(_) => (StatusCode::BAD_REQUEST, "INVALID_SESSION"),
            AppError::Extract(ExtractError::Malformed(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_PDF")
            }
            AppError::Extract(ExtractError::Task(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            AppError::FieldCount(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNEXPECTED_FIELD_COUNT")
            }
            AppError::Llm(_) => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Logs server-side failures; user input problems are not errors worth logging.
    pub fn log(&self) {
        match self {
            AppError::MissingInputs
            | AppError::Validation(_)
            | AppError::Multipart(_)
            | AppError::InvalidSession(_) => {}
            AppError::Extract(e) => tracing::error!("PDF extraction error: {e}"),
            AppError::FieldCount(e) => tracing::error!("Field extraction mismatch: {e}"),
            AppError::Llm(e) => tracing::error!("LLM error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status, code) = self.status_and_code();

        // Failures are surfaced as-is; there is no friendlier fallback message.
        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
