use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::index::IndexError;
use crate::ingest::IngestError;
use crate::llm_client::LlmError;

/// Request-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is rendered as `200 OK` with a flat `{"error": "..."}` body;
/// the chat front-end only distinguishes `response` from `error`.
/// Ingestion failures never reach a request: they abort boot as
/// `StartupError::Ingestion`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Retrieval(_) => "RETRIEVAL_ERROR",
            AppError::Generation(_) => "GENERATION_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidInput(msg) => tracing::warn!(code = self.code(), "{msg}"),
            _ => tracing::error!(code = self.code(), "{self}"),
        }

        let body = Json(json!({ "error": self.to_string() }));

        (StatusCode::OK, body).into_response()
    }
}

/// A failure in one of the boot stages. The process never binds its port
/// after any of these.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Missing GOOGLE_API_KEY. Set it in the environment or a .env file")]
    MissingCredentials,

    #[error("Failed to load resume: {0}")]
    Ingestion(#[from] IngestError),

    #[error("Failed to initialise Gemini client: {0}")]
    LlmInit(LlmError),

    #[error("Failed to build vector index: {0}")]
    IndexBuild(#[from] IndexError),
}

impl StartupError {
    /// Name of the boot stage that failed, for structured logs.
    pub fn stage(&self) -> &'static str {
        match self {
            StartupError::MissingCredentials => "credentials",
            StartupError::Ingestion(_) => "ingestion",
            StartupError::LlmInit(_) => "llm_init",
            StartupError::IndexBuild(_) => "index_build",
        }
    }
}
