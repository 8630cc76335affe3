use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::{models::AuthenticatedUser, services::ServiceError, AppState};

/// Require a valid bearer token. Fails closed: any lookup failure is a 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            AppError::unauthorized("Unauthorized")
        })?;

    let token = header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .trim();
    if token.is_empty() {
        return Err(AppError::unauthorized("Token is required"));
    }

    let user = match state.auth_service.resolve_by_token(token).await {
        Ok(user) => user,
        Err(ServiceError::Storage(e)) => {
            tracing::error!(error = %e, "Token lookup failed");
            return Err(AppError::unauthorized("Unauthorized"));
        }
        Err(_) => {
            tracing::warn!("Rejected unknown bearer token");
            return Err(AppError::unauthorized("Unauthorized"));
        }
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Extractor for the identity the gate bound to the request.
pub struct AuthUser(pub AuthenticatedUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

        tracing::Span::current().record("user_id", user.user_id);

        Ok(AuthUser(user))
    }
}
