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
        contacts::{CreateContactRequest, UpdateContactRequest},
        ApiResponse, Deleted, ListParams,
    },
    middleware::AuthUser,
    models::NewContact,
    utils::{QueryParams, ValidatedJson},
    AppState,
};

/// List the caller's contacts
#[utoipa::path(
    get,
    path = "/contacts",
    params(ListParams),
    responses(
        (status = 200, description = "Page of contacts", body = crate::dtos::ContactPageResponse),
        (status = 400, description = "Invalid paging parameters", body = crate::dtos::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.page_request()?;
    let search = params.search();
    let contacts = state
        .contact_service
        .list(user.user_id, page, search.as_deref())
        .await?;

    Ok(Json(ApiResponse::new(
        "Contacts retrieved successfully",
        contacts,
    )))
}

/// Create a contact owned by the caller
#[utoipa::path(
    post,
    path = "/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = crate::dtos::ContactResponse),
        (status = 400, description = "Invalid input", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
pub async fn create_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let contact = state
        .contact_service
        .create(NewContact {
            user_id: user.user_id,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Contact created successfully", contact)),
    ))
}

/// Get one of the caller's contacts
#[utoipa::path(
    get,
    path = "/contacts/{id}",
    params(("id" = i64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact", body = crate::dtos::ContactResponse),
        (status = 404, description = "Contact not found", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
pub async fn get_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let contact = state.contact_service.find_by_id(id, user.user_id).await?;

    Ok(Json(ApiResponse::new(
        "Contact retrieved successfully",
        contact,
    )))
}

/// Update a contact; omitted fields are left unchanged, empty optional fields are cleared
#[utoipa::path(
    put,
    path = "/contacts/{id}",
    params(("id" = i64, Path, description = "Contact id")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Updated contact", body = crate::dtos::ContactResponse),
        (status = 400, description = "Invalid input", body = crate::dtos::ErrorResponse),
        (status = 404, description = "Contact not found", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
pub async fn update_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<UpdateContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let contact = state
        .contact_service
        .update(id, user.user_id, req.into())
        .await?;

    Ok(Json(ApiResponse::new(
        "Contact updated successfully",
        contact,
    )))
}

/// Delete a contact and its addresses
#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    params(("id" = i64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact deleted", body = crate::dtos::DeletedResponse),
        (status = 404, description = "Contact not found", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    state.contact_service.delete(id, user.user_id).await?;

    Ok(Json(ApiResponse::new(
        "Contact deleted successfully",
        Deleted { id },
    )))
}
