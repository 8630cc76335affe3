use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{patch_optional, patch_required};

/// A postal address, owned by one contact and through it by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Address {
    #[sqlx(rename = "address_id")]
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub contact_id: i64,
    #[schema(example = "1 Infinite Loop")]
    pub street: Option<String>,
    #[schema(example = "Cupertino")]
    pub city: Option<String>,
    #[schema(example = "CA")]
    pub state: Option<String>,
    #[schema(example = "95014")]
    pub postal_code: Option<String>,
    #[schema(example = "US")]
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Address {
    pub fn apply(&mut self, patch: AddressPatch) {
        patch_optional(&mut self.street, patch.street);
        patch_optional(&mut self.city, patch.city);
        patch_optional(&mut self.state, patch.state);
        patch_optional(&mut self.postal_code, patch.postal_code);
        patch_required(&mut self.country, patch.country);
    }
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub contact_id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
}

#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}
