use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Per-field validation messages, keyed by the JSON field name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())` when nothing was recorded, otherwise every collected error at once.
    pub fn into_result(self) -> ApiResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ValidationFailed(self))
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User already exists")]
    DuplicateAccount,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access denied. No token provided.")]
    TokenMissing,

    #[error("Token expired.")]
    TokenExpired,

    #[error("Invalid token.")]
    TokenInvalid,

    #[error("Validation failed")]
    ValidationFailed(FieldErrors),

    #[error("Not found")]
    NotFoundOrUnauthorized,

    #[error("Server error")]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::DuplicateAccount
            | ApiError::InvalidCredentials
            | ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::TokenMissing | ApiError::TokenExpired | ApiError::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFoundOrUnauthorized => StatusCode::NOT_FOUND,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::default();
        errors.add(field, message);
        ApiError::ValidationFailed(errors)
    }

    fn log(&self) {
        match self {
            ApiError::Unexpected(e) => tracing::error!(error = ?e, "unexpected server error"),
            ApiError::DuplicateAccount | ApiError::InvalidCredentials => {
                tracing::warn!(error = %self, "credential check failed")
            }
            _ => tracing::debug!(error = %self, "request rejected"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = match &self {
            ApiError::ValidationFailed(errors) => json!({ "msg": self.to_string(), "errors": errors }),
            // The underlying error only goes to the log.
            ApiError::Unexpected(_) => json!({ "msg": "Server error" }),
            _ => json!({ "msg": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("body", rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ApiError::DuplicateAccount.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::TokenMissing.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenInvalid.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::NotFoundOrUnauthorized.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Unexpected(anyhow::anyhow!("db down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn field_errors_keep_first_message_per_field() {
        let mut errors = FieldErrors::default();
        errors.add("email", "Email is required");
        errors.add("email", "Please enter a valid email address");
        errors.add("name", "Name is required");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn empty_field_errors_pass() {
        assert!(FieldErrors::default().into_result().is_ok());
    }

    #[tokio::test]
    async fn unexpected_error_does_not_leak_detail() {
        let res = ApiError::Unexpected(anyhow::anyhow!("password=hunter2 connection refused"))
            .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("Server error"));
        assert!(!body.contains("hunter2"));
    }

    #[tokio::test]
    async fn validation_failure_lists_every_field() {
        let mut errors = FieldErrors::default();
        errors.add("name", "Name is required");
        errors.add("message", "Message is required");
        let res = ApiError::ValidationFailed(errors).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"]["name"], "Name is required");
        assert_eq!(body["errors"]["message"], "Message is required");
        assert!(body["msg"].is_string());
    }
}
