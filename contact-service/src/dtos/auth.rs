use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::UserProfile;
use crate::services::Session;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 100, message = "Name must be between 3 and 100 characters"))]
    #[schema(example = "Ada Lovelace")]
    #[serde(deserialize_with = "crate::utils::trimmed")]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    #[serde(deserialize_with = "crate::utils::trimmed")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    #[serde(deserialize_with = "crate::utils::trimmed")]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret123")]
    pub password: String,
}

/// Returned by login and `GET /me`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserProfile,
    #[schema(example = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")]
    pub access_token: String,
}

impl From<Session> for AuthResponse {
    fn from(session: Session) -> Self {
        AuthResponse {
            user: session.user,
            access_token: session.token,
        }
    }
}
