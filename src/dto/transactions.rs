use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::NewCartItem;

use super::not_blank;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTransactionRequest {
    #[validate(range(min = 1))]
    pub address_id: i64,
    #[validate(custom = "not_blank")]
    pub payment_method: String,
    #[validate(length(min = 1))]
    pub carts: Vec<CartItemRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CartItemRequest {
    #[validate(range(min = 1))]
    pub product_id: i64,
    #[validate(custom = "not_blank")]
    pub product_name: String,
    #[validate(range(min = 1))]
    pub price: i64,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl From<CartItemRequest> for NewCartItem {
    fn from(request: CartItemRequest) -> Self {
        Self {
            product_id: request.product_id,
            product_name: request.product_name.trim().to_string(),
            price: request.price,
            quantity: request.quantity,
        }
    }
}

/// Query string of the Snap finish redirect.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FinishPaymentQuery {
    pub order_id: String,
    pub status_code: Option<String>,
    pub transaction_status: Option<String>,
}
