//! User accounts: credentials, session token, and the public profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::patch_required;
use crate::utils::PasswordHashString;

/// User row. Holds the password hash and session token, so it is never
/// serialized directly; use [`User::profile`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    #[sqlx(rename = "user_id")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn password_hash(&self) -> PasswordHashString {
        PasswordHashString::from_stored(self.password_hash.clone())
    }

    pub fn apply(&mut self, patch: UserPatch) {
        patch_required(&mut self.name, patch.name);
        patch_required(&mut self.email, patch.email);
    }
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Insert payload. The hash type guarantees the raw password never reaches
/// storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: PasswordHashString,
}

/// Merge-patch for profile fields.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Identity bound into the request by the auth gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}
