//! Business rules for each vertical. Services own ownership checks, input
//! normalisation and the mapping from "no row" to a domain `NotFound`.

pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod error;
pub mod metrics;
pub mod users;

pub use addresses::AddressService;
pub use auth::{AuthService, Session};
pub use contacts::ContactService;
pub use error::ServiceError;
pub use users::UserService;

/// Emails are compared and stored lowercase.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim a required field and reject it if nothing is left.
pub(crate) fn required(field: &str, value: String) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional field; blank becomes absent.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim a patch value but keep an empty string, which clears the field.
pub(crate) fn patch_value(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Validate a required field in a patch, only when it was supplied.
pub(crate) fn patch_required(field: &str, value: Option<String>) -> Result<Option<String>, ServiceError> {
    value.map(|v| required(field, v)).transpose()
}
