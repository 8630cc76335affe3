pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod users;

use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use utoipa::{IntoParams, ToSchema};

use crate::models::{
    Address, AddressPage, Contact, ContactPage, PageRequest, PageRequestError, UserPage,
    UserProfile,
};
use auth::AuthResponse;

/// Success envelope wrapping every payload.
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    UserResponse = ApiResponse<UserProfile>,
    SessionResponse = ApiResponse<AuthResponse>,
    UserPageResponse = ApiResponse<UserPage>,
    ContactResponse = ApiResponse<Contact>,
    ContactPageResponse = ApiResponse<ContactPage>,
    AddressResponse = ApiResponse<Address>,
    AddressPageResponse = ApiResponse<AddressPage>,
    DeletedResponse = ApiResponse<Deleted>
)]
pub struct ApiResponse<T> {
    #[schema(example = "Contact created successfully")]
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Failure envelope, mirroring `service_core::error::ErrorBody` for the docs.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "contact not found")]
    pub error: String,
    #[schema(example = "not_found")]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Payload returned by every delete endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Deleted {
    #[schema(example = 1)]
    pub id: i64,
}

/// `page`, `limit` and `search` query parameters. Kept as raw strings so a
/// non-numeric value produces our own 400 rather than the extractor's.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number (default 1)
    #[param(example = "1")]
    pub page: Option<String>,
    /// Page size, 1 to 100 (default 10)
    #[param(example = "10")]
    pub limit: Option<String>,
    /// Case-insensitive substring filter
    pub search: Option<String>,
}

impl ListParams {
    pub fn page_request(&self) -> Result<PageRequest, AppError> {
        let defaults = PageRequest::default();
        let page = parse_param(self.page.as_deref(), defaults.page(), "Invalid page")?;
        let limit = parse_param(self.limit.as_deref(), defaults.limit(), "Invalid limit")?;

        PageRequest::new(page, limit).map_err(|e: PageRequestError| AppError::bad_request(e.to_string()))
    }

    pub fn search(&self) -> Option<String> {
        normalize_search(self.search.as_deref())
    }
}

/// Query parameters for `GET /addresses`; `contact_id` is mandatory.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddressListParams {
    /// Parent contact; must belong to the caller
    #[param(example = "1")]
    pub contact_id: Option<String>,
    #[param(example = "1")]
    pub page: Option<String>,
    #[param(example = "10")]
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl AddressListParams {
    pub fn contact_id(&self) -> Result<i64, AppError> {
        let raw = self
            .contact_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::bad_request("contact_id is required"))?;

        raw.parse()
            .map_err(|_| AppError::bad_request("Invalid contact_id"))
    }

    pub fn page_request(&self) -> Result<PageRequest, AppError> {
        ListParams {
            page: self.page.clone(),
            limit: self.limit.clone(),
            search: None,
        }
        .page_request()
    }

    pub fn search(&self) -> Option<String> {
        normalize_search(self.search.as_deref())
    }
}

fn parse_param(raw: Option<&str>, default: i64, message: &str) -> Result<i64, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| AppError::bad_request(message.to_string())),
    }
}

fn normalize_search(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
