use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::ContactPatch;

/// New contact. The owner is always the caller, so there is no `user_id`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContactRequest {
    #[validate(length(min = 2, max = 100, message = "First name must be between 2 and 100 characters"))]
    #[schema(example = "Grace")]
    #[serde(deserialize_with = "crate::utils::trimmed")]
    pub first_name: String,

    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    #[schema(example = "Hopper")]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub last_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "grace@example.com")]
    #[serde(deserialize_with = "crate::utils::trimmed")]
    pub email: String,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    #[schema(example = "+1-555-0100")]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub phone: Option<String>,
}

/// Merge-patch. An empty `last_name` or `phone` clears the field.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateContactRequest {
    #[validate(length(min = 2, max = 100, message = "First name must be between 2 and 100 characters"))]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub first_name: Option<String>,

    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub last_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub phone: Option<String>,
}

impl From<UpdateContactRequest> for ContactPatch {
    fn from(req: UpdateContactRequest) -> Self {
        ContactPatch {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
        }
    }
}
