use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::AddressPatch;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAddressRequest {
    #[validate(range(min = 1, message = "Invalid contact_id"))]
    #[schema(example = 1)]
    pub contact_id: i64,

    #[validate(length(max = 255, message = "Street must be at most 255 characters"))]
    #[schema(example = "1 Infinite Loop")]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub street: Option<String>,

    #[validate(length(max = 100, message = "City must be at most 100 characters"))]
    #[schema(example = "Cupertino")]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub city: Option<String>,

    #[validate(length(max = 100, message = "State must be at most 100 characters"))]
    #[schema(example = "CA")]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub state: Option<String>,

    #[validate(length(max = 20, message = "Postal code must be at most 20 characters"))]
    #[schema(example = "95014")]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub postal_code: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Country is required"))]
    #[schema(example = "US")]
    #[serde(deserialize_with = "crate::utils::trimmed")]
    pub country: String,
}

/// Merge-patch. The parent contact cannot be changed.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAddressRequest {
    #[validate(length(max = 255, message = "Street must be at most 255 characters"))]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub street: Option<String>,

    #[validate(length(max = 100, message = "City must be at most 100 characters"))]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub city: Option<String>,

    #[validate(length(max = 100, message = "State must be at most 100 characters"))]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub state: Option<String>,

    #[validate(length(max = 20, message = "Postal code must be at most 20 characters"))]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub postal_code: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Country is required"))]
    #[serde(default, deserialize_with = "crate::utils::trimmed_opt")]
    pub country: Option<String>,
}

impl From<UpdateAddressRequest> for AddressPatch {
    fn from(req: UpdateAddressRequest) -> Self {
        AddressPatch {
            street: req.street,
            city: req.city,
            state: req.state,
            postal_code: req.postal_code,
            country: req.country,
        }
    }
}
