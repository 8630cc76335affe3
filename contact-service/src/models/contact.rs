use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{patch_optional, patch_required};

/// A contact, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Contact {
    #[sqlx(rename = "contact_id")]
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "Grace")]
    pub first_name: String,
    #[schema(example = "Hopper")]
    pub last_name: Option<String>,
    #[schema(example = "grace@example.com")]
    pub email: String,
    #[schema(example = "+1-555-0100")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn apply(&mut self, patch: ContactPatch) {
        patch_required(&mut self.first_name, patch.first_name);
        patch_optional(&mut self.last_name, patch.last_name);
        patch_required(&mut self.email, patch.email);
        patch_optional(&mut self.phone, patch.phone);
    }
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
