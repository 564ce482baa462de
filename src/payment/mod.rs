use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::TransactionStatus;

pub mod midtrans;

pub use midtrans::MidtransClient;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Snap session handed back to the client to complete payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentSession {
    pub token: String,
    pub redirect_url: String,
}

/// Status report returned by the gateway's status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatus {
    #[serde(default)]
    pub order_id: String,
    pub status_code: String,
    #[serde(default)]
    pub transaction_status: String,
    #[serde(default)]
    pub fraud_status: Option<String>,
    #[serde(default)]
    pub gross_amount: Option<String>,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl PaymentStatus {
    pub fn outcome(&self) -> Option<TransactionStatus> {
        gateway_outcome(&self.transaction_status, self.fraud_status.as_deref())
    }
}

/// HTTP notification body posted by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentNotification {
    pub order_id: String,
    pub status_code: String,
    pub gross_amount: String,
    pub signature_key: String,
    #[serde(default)]
    pub transaction_status: String,
    #[serde(default)]
    pub fraud_status: Option<String>,
}

/// Maps a gateway transaction status to the order status it implies.
/// `None` means the report does not move the order.
pub fn gateway_outcome(
    transaction_status: &str,
    fraud_status: Option<&str>,
) -> Option<TransactionStatus> {
    match transaction_status {
        "settlement" => Some(TransactionStatus::Finished),
        "capture" => match fraud_status {
            None | Some("accept") => Some(TransactionStatus::Paid),
            Some(_) => None,
        },
        "deny" | "cancel" | "expire" | "failure" => Some(TransactionStatus::Failed),
        _ => None,
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a payment session for `order_id`, which the gateway also uses as
    /// its idempotency key.
    async fn create_transaction(
        &self,
        order_id: &str,
        gross_amount: i64,
    ) -> Result<PaymentSession, GatewayError>;

    async fn payment_status(&self, order_id: &str) -> Result<PaymentStatus, GatewayError>;

    fn verify_notification(&self, notification: &PaymentNotification) -> bool;
}
