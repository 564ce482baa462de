use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use super::{GatewayError, PaymentGateway, PaymentNotification, PaymentSession, PaymentStatus};
use crate::config::GatewayConfig;

/// Midtrans Snap client. Authenticates with the server key as the basic-auth
/// user name and an empty password.
#[derive(Clone)]
pub struct MidtransClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

#[derive(Serialize)]
struct SnapRequest<'a> {
    transaction_details: TransactionDetails<'a>,
    callbacks: SnapCallbacks<'a>,
}

#[derive(Serialize)]
struct TransactionDetails<'a> {
    order_id: &'a str,
    gross_amount: i64,
}

#[derive(Serialize)]
struct SnapCallbacks<'a> {
    finish: &'a str,
}

#[derive(Deserialize, Default)]
struct SnapErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
}

impl MidtransClient {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// `hex(SHA512(order_id + status_code + gross_amount + server_key))`
    pub fn signature_for(&self, order_id: &str, status_code: &str, gross_amount: &str) -> String {
        hex::encode(self.signature_digest(order_id, status_code, gross_amount))
    }

    fn signature_digest(&self, order_id: &str, status_code: &str, gross_amount: &str) -> Vec<u8> {
        let mut hasher = Sha512::new();
        hasher.update(order_id.as_bytes());
        hasher.update(status_code.as_bytes());
        hasher.update(gross_amount.as_bytes());
        hasher.update(self.config.server_key.as_bytes());
        hasher.finalize().to_vec()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[async_trait]
impl PaymentGateway for MidtransClient {
    async fn create_transaction(
        &self,
        order_id: &str,
        gross_amount: i64,
    ) -> Result<PaymentSession, GatewayError> {
        let body = SnapRequest {
            transaction_details: TransactionDetails {
                order_id,
                gross_amount,
            },
            callbacks: SnapCallbacks {
                finish: &self.config.finish_url,
            },
        };

        let response = self
            .http
            .post(&self.config.snap_url)
            .basic_auth(&self.config.server_key, None::<&str>)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .inspect_err(|err| tracing::warn!(order_id, error = %err, "snap request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<SnapErrorBody>()
                .await
                .unwrap_or_default()
                .error_messages
                .join("; ");
            tracing::warn!(order_id, status = status.as_u16(), %message, "snap transaction rejected");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let session = response.json::<PaymentSession>().await?;
        tracing::info!(order_id, gross_amount, "payment session created");
        Ok(session)
    }

    async fn payment_status(&self, order_id: &str) -> Result<PaymentStatus, GatewayError> {
        let url = format!("{}/{}/status", self.config.api_base_url, order_id);
        let response = self
            .http
            .get(url)
            .basic_auth(&self.config.server_key, None::<&str>)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .inspect_err(|err| tracing::warn!(order_id, error = %err, "status request failed"))?;

        let http_status = response.status();
        if !http_status.is_success() {
            tracing::warn!(order_id, status = http_status.as_u16(), "status request rejected");
            return Err(GatewayError::Rejected {
                status: http_status.as_u16(),
                message: http_status.to_string(),
            });
        }

        let status = response.json::<PaymentStatus>().await?;
        // Unknown orders come back as HTTP 200 with an error code in the body.
        if status.transaction_status.is_empty() {
            let message = status.status_message.clone().unwrap_or_default();
            tracing::warn!(order_id, code = %status.status_code, %message, "status lookup failed");
            return Err(GatewayError::Rejected {
                status: status.status_code.parse().unwrap_or(0),
                message,
            });
        }

        tracing::debug!(order_id, transaction_status = %status.transaction_status, "payment status fetched");
        Ok(status)
    }

    fn verify_notification(&self, notification: &PaymentNotification) -> bool {
        let Ok(received) = hex::decode(notification.signature_key.trim()) else {
            return false;
        };
        let expected = self.signature_digest(
            &notification.order_id,
            &notification.status_code,
            &notification.gross_amount,
        );
        constant_time_eq(&expected, &received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MidtransClient {
        MidtransClient::new(GatewayConfig {
            server_key: "SB-Mid-server-test".into(),
            snap_url: "http://127.0.0.1:9/snap/v1/transactions".into(),
            api_base_url: "http://127.0.0.1:9/v2".into(),
            finish_url: "http://127.0.0.1:9/finish".into(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    fn notification(signature_key: String) -> PaymentNotification {
        PaymentNotification {
            order_id: "ORDER-1".into(),
            status_code: "200".into(),
            gross_amount: "100000.00".into(),
            signature_key,
            transaction_status: "settlement".into(),
            fraud_status: None,
        }
    }

    #[test]
    fn signature_is_sha512_hex_of_the_concatenated_fields() {
        let client = client();
        let expected = {
            let mut hasher = Sha512::new();
            hasher.update(b"ORDER-1200100000.00SB-Mid-server-test");
            hex::encode(hasher.finalize())
        };
        assert_eq!(client.signature_for("ORDER-1", "200", "100000.00"), expected);
        assert_eq!(expected.len(), 128);
    }

    #[test]
    fn verifies_matching_signature_only() {
        let client = client();
        let good = client.signature_for("ORDER-1", "200", "100000.00");
        assert!(client.verify_notification(&notification(good.to_uppercase())));
        assert!(!client.verify_notification(&notification("deadbeef".into())));

        let mut tampered = notification(good.clone());
        tampered.gross_amount = "1.00".into();
        assert!(!client.verify_notification(&tampered));

        // Same length, last byte differs.
        let mut flipped = good[..126].to_string();
        flipped.push_str(if good.ends_with("00") { "01" } else { "00" });
        assert!(!client.verify_notification(&notification(flipped)));
        assert!(!client.verify_notification(&notification(good[..64].to_string())));
        assert!(!client.verify_notification(&notification("not hex".into())));
    }

    #[test]
    fn byte_comparison_requires_equal_length_and_content() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
