use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use super::IdPath;
use crate::{
    dtos::{
        users::{CreateUserRequest, UpdateUserRequest},
        ApiResponse, Deleted, ListParams,
    },
    middleware::AuthUser,
    utils::{Password, QueryParams, ValidatedJson},
    AppState,
};

/// List users
#[utoipa::path(
    get,
    path = "/users",
    params(ListParams),
    responses(
        (status = 200, description = "Page of users", body = crate::dtos::UserPageResponse),
        (status = 400, description = "Invalid paging parameters", body = crate::dtos::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.page_request()?;
    let search = params.search();
    let users = state.user_service.list(page, search.as_deref()).await?;

    Ok(Json(ApiResponse::new("Users retrieved successfully", users)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = crate::dtos::UserResponse),
        (status = 400, description = "Invalid input", body = crate::dtos::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let password = Password::new(req.password);
    let user = state
        .user_service
        .create(req.name, &req.email, &password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("User created successfully", user)),
    ))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = crate::dtos::UserResponse),
        (status = 404, description = "User not found", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.find_by_id(id).await?;

    Ok(Json(ApiResponse::new("User retrieved successfully", user)))
}

/// Update a user; omitted fields are left unchanged
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = crate::dtos::UserResponse),
        (status = 404, description = "User not found", body = crate::dtos::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    _user: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.update(id, req.into()).await?;

    Ok(Json(ApiResponse::new("User updated successfully", user)))
}

/// Delete a user together with their contacts and addresses
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = crate::dtos::DeletedResponse),
        (status = 404, description = "User not found", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    _user: AuthUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    state.user_service.delete(id).await?;

    Ok(Json(ApiResponse::new("User deleted successfully", Deleted { id })))
}
