use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which side of the language pair a code was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRole {
    Source,
    Target,
}

impl fmt::Display for LanguageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageRole::Source => f.write_str("Source"),
            LanguageRole::Target => f.write_str("Target"),
        }
    }
}

/// Failures of a single translation request.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("{role} language '{code}' not supported")]
    UnsupportedLanguage { role: LanguageRole, code: String },

    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Text too long (max {max} characters)")]
    TextTooLong { max: usize },

    /// Anything that went wrong talking to the completion API.
    #[error("Translation failed: {0}")]
    Upstream(String),
}

impl TranslateError {
    pub fn status(&self) -> StatusCode {
        match self {
            TranslateError::UnsupportedLanguage { .. }
            | TranslateError::EmptyText
            | TranslateError::TextTooLong { .. } => StatusCode::BAD_REQUEST,
            TranslateError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body: `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
