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
        addresses::{CreateAddressRequest, UpdateAddressRequest},
        AddressListParams, ApiResponse, Deleted,
    },
    middleware::AuthUser,
    models::NewAddress,
    utils::{QueryParams, ValidatedJson},
    AppState,
};

/// List the addresses of one of the caller's contacts
#[utoipa::path(
    get,
    path = "/addresses",
    params(AddressListParams),
    responses(
        (status = 200, description = "Page of addresses", body = crate::dtos::AddressPageResponse),
        (status = 400, description = "Missing or invalid contact_id", body = crate::dtos::ErrorResponse),
        (status = 404, description = "Contact not found", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Addresses"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(params): QueryParams<AddressListParams>,
) -> Result<impl IntoResponse, AppError> {
    let contact_id = params.contact_id()?;
    let page = params.page_request()?;
    let search = params.search();
    let addresses = state
        .address_service
        .list(user.user_id, contact_id, page, search.as_deref())
        .await?;

    Ok(Json(ApiResponse::new(
        "Addresses retrieved successfully",
        addresses,
    )))
}

/// Add an address to one of the caller's contacts
#[utoipa::path(
    post,
    path = "/addresses",
    request_body = CreateAddressRequest,
    responses(
        (status = 201, description = "Address created", body = crate::dtos::AddressResponse),
        (status = 400, description = "Invalid input", body = crate::dtos::ErrorResponse),
        (status = 404, description = "Contact not found", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Addresses"
)]
pub async fn create_address(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateAddressRequest>,
) -> Result<impl IntoResponse, AppError> {
    let address = state
        .address_service
        .create(
            user.user_id,
            NewAddress {
                contact_id: req.contact_id,
                street: req.street,
                city: req.city,
                state: req.state,
                postal_code: req.postal_code,
                country: req.country,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Address created successfully", address)),
    ))
}

/// Get an address the caller owns through its contact
#[utoipa::path(
    get,
    path = "/addresses/{id}",
    params(("id" = i64, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address", body = crate::dtos::AddressResponse),
        (status = 404, description = "Address not found", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Addresses"
)]
pub async fn get_address(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let address = state.address_service.find_by_id(id, user.user_id).await?;

    Ok(Json(ApiResponse::new(
        "Address retrieved successfully",
        address,
    )))
}

/// Update an address; omitted fields are left unchanged, empty optional fields are cleared
#[utoipa::path(
    put,
    path = "/addresses/{id}",
    params(("id" = i64, Path, description = "Address id")),
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Updated address", body = crate::dtos::AddressResponse),
        (status = 400, description = "Invalid input", body = crate::dtos::ErrorResponse),
        (status = 404, description = "Address not found", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Addresses"
)]
pub async fn update_address(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<UpdateAddressRequest>,
) -> Result<impl IntoResponse, AppError> {
    let address = state
        .address_service
        .update(id, user.user_id, req.into())
        .await?;

    Ok(Json(ApiResponse::new(
        "Address updated successfully",
        address,
    )))
}

/// Delete an address
#[utoipa::path(
    delete,
    path = "/addresses/{id}",
    params(("id" = i64, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address deleted", body = crate::dtos::DeletedResponse),
        (status = 404, description = "Address not found", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Addresses"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    state.address_service.delete(id, user.user_id).await?;

    Ok(Json(ApiResponse::new(
        "Address deleted successfully",
        Deleted { id },
    )))
}
