use axum::extract::FromRequest;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// `axum::Json` whose rejections come back as a `body` validation error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Record id from a path segment. Malformed ids answer like a miss.
pub fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFoundOrUnauthorized)
}
