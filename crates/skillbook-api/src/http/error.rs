//! Application error type mapping to HTTP status codes.
//!
//! Error bodies have the shape `{"detail": "...", "code": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use skillbook_types::error::SkillError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Skill-related errors.
    Skill(SkillError),
}

impl From<SkillError> for AppError {
    fn from(e: SkillError) -> Self {
        AppError::Skill(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Skill(e @ (SkillError::NotFoundById(_) | SkillError::NotFoundByName(_))) => {
                (StatusCode::NOT_FOUND, "SKILL_NOT_FOUND", e.to_string())
            }
            AppError::Skill(SkillError::Conflict(_)) => {
                (StatusCode::CONFLICT, "SKILL_CONFLICT", "Skill already added".to_string())
            }
            AppError::Skill(SkillError::InvalidName(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Skill(e @ SkillError::StorageError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, detail) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, %detail, "request failed");
        }

        (status, Json(json!({ "detail": detail, "code": code }))).into_response()
    }
}
