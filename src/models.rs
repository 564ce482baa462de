use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A user together with the stored password hash; never serialized.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub recipient: String,
    #[serde(rename = "hp")]
    pub phone: String,
    pub street: String,
    pub sub_district: String,
    pub urban_village: String,
    pub city: String,
    #[serde(rename = "zip")]
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address fields as accepted from a client, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub recipient: String,
    pub phone: String,
    pub street: String,
    pub sub_district: String,
    pub urban_village: String,
    pub city: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub price: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_id: i64,
    pub product_name: String,
    pub price: i64,
    pub quantity: i32,
}

impl NewCartItem {
    pub fn subtotal(&self) -> Option<i64> {
        self.price.checked_mul(i64::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub order_id: String,
    pub user_id: i64,
    pub address_id: i64,
    pub payment_method: String,
    pub total_bill: i64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub carts: Vec<CartItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub order_id: String,
    pub user_id: i64,
    pub address_id: i64,
    pub payment_method: String,
    pub total_bill: i64,
    pub carts: Vec<NewCartItem>,
}

/// Lifecycle of an order.
///
/// `created` may move to any other state; `paid` may only settle or fail;
/// `cancelled`, `finished` and `failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Created,
    Paid,
    Cancelled,
    Finished,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Created => "created",
            TransactionStatus::Paid => "paid",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Finished => "finished",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Cancelled | TransactionStatus::Finished | TransactionStatus::Failed
        )
    }

    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Created, Paid | Cancelled | Finished | Failed) | (Paid, Finished | Failed)
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "created" => Ok(TransactionStatus::Created),
            "paid" => Ok(TransactionStatus::Paid),
            "cancelled" => Ok(TransactionStatus::Cancelled),
            "finished" => Ok(TransactionStatus::Finished),
            "failed" => Ok(TransactionStatus::Failed),
            other => Err(format!("unknown transaction status `{other}`")),
        }
    }
}
