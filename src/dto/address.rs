use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::NewAddress;

use super::{digits_only, not_blank};

/// Body of create and update. Absent fields deserialize as empty strings so
/// that they are reported by validation instead of failing the bind.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressRequest {
    #[serde(alias = "Recipient")]
    #[validate(custom = "not_blank")]
    pub recipient: String,
    #[serde(rename = "hp", alias = "Hp")]
    #[validate(custom = "digits_only")]
    pub phone: String,
    #[serde(alias = "Street")]
    #[validate(custom = "not_blank")]
    pub street: String,
    #[serde(alias = "SubDistrict")]
    #[validate(custom = "not_blank")]
    pub sub_district: String,
    #[serde(alias = "UrbanVillage")]
    #[validate(custom = "not_blank")]
    pub urban_village: String,
    #[serde(alias = "City")]
    #[validate(custom = "not_blank")]
    pub city: String,
    #[serde(rename = "zip", alias = "Zip")]
    #[validate(custom = "digits_only")]
    pub postal_code: String,
}

impl From<AddressRequest> for NewAddress {
    fn from(request: AddressRequest) -> Self {
        Self {
            recipient: request.recipient.trim().to_string(),
            phone: request.phone,
            street: request.street.trim().to_string(),
            sub_district: request.sub_district.trim().to_string(),
            urban_village: request.urban_village.trim().to_string(),
            city: request.city.trim().to_string(),
            postal_code: request.postal_code,
        }
    }
}
