// src/error.rs
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Everything that can end a text-to-video request without a result.
///
/// Each variant maps to the HTTP status and `detail` string the caller sees,
/// see the `IntoResponse` impl below.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The create call succeeded but carried no task identifier.
    #[error("Failed to create video task")]
    Creation,

    /// The upstream answered with a non-success status.
    #[error("External API error: {body}")]
    ExternalService { status: StatusCode, body: String },

    /// The task reported completion without a video URL.
    #[error("Video URL missing")]
    MissingResult,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    InvalidRequest(String),

    /// The request body could not be read as a `GenerationRequest`.
    #[error("{detail}")]
    MalformedBody { status: StatusCode, detail: String },
}

impl GenerationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerationError::ExternalService { status, .. }
            | GenerationError::MalformedBody { status, .. } => *status,
            GenerationError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GenerationError::Creation
            | GenerationError::MissingResult
            | GenerationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for GenerationError {
    fn from(rejection: JsonRejection) -> Self {
        GenerationError::MalformedBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Internal(err.to_string())
    }
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), detail = %detail, "text-to-video request failed");
        } else {
            tracing::warn!(status = %status.as_u16(), detail = %detail, "text-to-video request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Startup configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}
