//! Failure taxonomy of the service and its mapping onto HTTP responses.
//!
//! `NotFound` and `Invalid` are the only client-visible errors; everything
//! else is a dependency failing underneath us and is surfaced unmodified.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no such resource: {0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("storage error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("renderer error: {0}")]
    Renderer(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Invalid(_) => StatusCode::BAD_REQUEST,
            AppError::Renderer(_) => StatusCode::BAD_GATEWAY,
            AppError::Store(_) | AppError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
