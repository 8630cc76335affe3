use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::UserPatch;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 100, message = "Name must be between 3 and 100 characters"))]
    #[schema(example = "Grace Hopper")]
    #[serde(deserialize_with = "crate::utils::trimmed")]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "grace@example.com")]
    #[serde(deserialize_with = "crate::utils::trimmed")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
}

/// Merge-patch: omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 100, message = "Name must be between 3 and 100 characters"))]
    #[schema(example = "Grace B. Hopper")]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "grace@example.com")]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        UserPatch {
            name: req.name,
            email: req.email,
        }
    }
}
