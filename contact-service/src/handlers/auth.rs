use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::{
    dtos::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        ApiResponse,
    },
    middleware::AuthUser,
    utils::{Password, ValidatedJson},
    AppState,
};

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = crate::dtos::UserResponse),
        (status = 400, description = "Invalid input", body = crate::dtos::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::dtos::ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let password = Password::new(req.password);
    let user = state
        .auth_service
        .register(req.name, &req.email, &password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("User registered successfully", user)),
    ))
}

/// Log in and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = crate::dtos::SessionResponse),
        (status = 400, description = "Invalid input", body = crate::dtos::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::dtos::ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let password = Password::new(req.password);
    let session = state.auth_service.login(&req.email, &password).await?;

    Ok(Json(ApiResponse::new(
        "Login successful",
        AuthResponse::from(session),
    )))
}

/// Current user and their active token
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current session", body = crate::dtos::SessionResponse),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let session = state.auth_service.resolve_by_id(user.user_id).await?;

    Ok(Json(ApiResponse::new(
        "User retrieved successfully",
        AuthResponse::from(session),
    )))
}
