pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod metrics;
pub mod users;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use service_core::error::AppError;

/// Numeric `:id` path segment. Anything that is not an integer, including
/// a segment that fails to percent-decode, is a 400 "Invalid id".
pub struct IdPath(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e.body_text(), "Rejected path parameter");
                AppError::bad_request("Invalid id")
            })?;

        parse_id(&raw).map(IdPath)
    }
}

/// Parse a path id. Non-numeric ids are a client error, not a 404.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::bad_request("Invalid id"))
}
