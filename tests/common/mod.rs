#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use axum_checkout_api::{
    config::{AppConfig, GatewayConfig},
    error::{AppError, AppResult},
    models::{Address, NewAddress, NewTransaction, Transaction, TransactionStatus},
    payment::{GatewayError, PaymentGateway, PaymentNotification, PaymentSession, PaymentStatus},
    repository::{
        AddressRepository, InMemoryAddressRepository, InMemoryTransactionRepository,
        InMemoryUserRepository, TransactionRepository,
    },
    routes::create_router,
    services::auth_service::issue_token,
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";
pub const USER_ID: i64 = 1;
pub const OTHER_USER_ID: i64 = 2;

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        host: "127.0.0.1".into(),
        port: 8000,
        jwt_secret: JWT_SECRET.into(),
        gateway: GatewayConfig {
            server_key: "SB-Mid-server-test".into(),
            snap_url: "http://127.0.0.1:9/snap/v1/transactions".into(),
            api_base_url: "http://127.0.0.1:9/v2".into(),
            finish_url: "http://127.0.0.1:8000/api/transactions/finish_payment".into(),
            timeout_secs: 1,
        },
    }
}

/// Gateway double: records session requests and reports a configurable status.
#[derive(Default)]
pub struct StubGateway {
    pub sessions: Mutex<Vec<(String, i64)>>,
    pub status_polls: Mutex<Vec<String>>,
    pub reported_status: Mutex<String>,
    pub unavailable: bool,
    pub order_unknown: bool,
}

impl StubGateway {
    pub fn reporting(status: &str) -> Self {
        let gateway = Self::default();
        gateway.report(status);
        gateway
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Status lookups answer like Midtrans does for orders it never saw.
    pub fn unknown_order() -> Self {
        Self {
            order_unknown: true,
            ..Self::default()
        }
    }

    pub fn report(&self, status: &str) {
        *self.reported_status.lock().unwrap() = status.to_string();
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_transaction(
        &self,
        order_id: &str,
        gross_amount: i64,
    ) -> Result<PaymentSession, GatewayError> {
        if self.unavailable {
            return Err(GatewayError::Rejected {
                status: 503,
                message: "maintenance".into(),
            });
        }
        self.sessions
            .lock()
            .unwrap()
            .push((order_id.to_string(), gross_amount));
        Ok(PaymentSession {
            token: format!("snap-token-{order_id}"),
            redirect_url: format!("https://app.sandbox.midtrans.com/snap/v2/vtweb/{order_id}"),
        })
    }

    async fn payment_status(&self, order_id: &str) -> Result<PaymentStatus, GatewayError> {
        self.status_polls.lock().unwrap().push(order_id.to_string());
        if self.order_unknown {
            return Err(GatewayError::Rejected {
                status: 404,
                message: "Transaction doesn't exist.".into(),
            });
        }
        Ok(PaymentStatus {
            order_id: order_id.to_string(),
            status_code: "200".into(),
            transaction_status: self.reported_status.lock().unwrap().clone(),
            fraud_status: None,
            gross_amount: None,
            payment_type: Some("bank_transfer".into()),
            status_message: None,
        })
    }

    fn verify_notification(&self, notification: &PaymentNotification) -> bool {
        notification.signature_key == "valid-signature"
    }
}

/// Address repository whose every call fails like an unreachable database.
pub struct FailingAddressRepository;

fn database_down() -> AppError {
    AppError::OrmError(sea_orm::DbErr::Custom("Access Database Error".into()))
}

#[async_trait]
impl AddressRepository for FailingAddressRepository {
    async fn create_address(&self, _user_id: i64, _address: NewAddress) -> AppResult<Address> {
        Err(database_down())
    }

    async fn get_all_address(&self, _user_id: i64) -> AppResult<Vec<Address>> {
        Err(database_down())
    }

    async fn get_address_id(&self, _user_id: i64, _id: i64) -> AppResult<Address> {
        Err(database_down())
    }

    async fn update_address(
        &self,
        _user_id: i64,
        _id: i64,
        _address: NewAddress,
    ) -> AppResult<Address> {
        Err(database_down())
    }

    async fn delete_address(&self, _user_id: i64, _id: i64) -> AppResult<()> {
        Err(database_down())
    }
}

/// Transaction repository whose every call fails like an unreachable database.
pub struct FailingTransactionRepository;

#[async_trait]
impl TransactionRepository for FailingTransactionRepository {
    async fn create_transaction(&self, _transaction: NewTransaction) -> AppResult<Transaction> {
        Err(database_down())
    }

    async fn get_all_transaction(&self, _user_id: i64) -> AppResult<Vec<Transaction>> {
        Err(database_down())
    }

    async fn get_transaction_detail(
        &self,
        _user_id: i64,
        _order_id: &str,
    ) -> AppResult<Transaction> {
        Err(database_down())
    }

    async fn find_by_order_id(&self, _order_id: &str) -> AppResult<Transaction> {
        Err(database_down())
    }

    async fn update_status(
        &self,
        _order_id: &str,
        _from: TransactionStatus,
        _to: TransactionStatus,
    ) -> AppResult<Transaction> {
        Err(database_down())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub gateway: Arc<StubGateway>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(
            Arc::new(InMemoryAddressRepository::new()),
            Arc::new(InMemoryTransactionRepository::new()),
            StubGateway::reporting("pending"),
        )
    }

    pub fn with_addresses(addresses: Arc<dyn AddressRepository>) -> Self {
        Self::build(
            addresses,
            Arc::new(InMemoryTransactionRepository::new()),
            StubGateway::reporting("pending"),
        )
    }

    pub fn with_transactions(transactions: Arc<dyn TransactionRepository>) -> Self {
        Self::build(
            Arc::new(InMemoryAddressRepository::new()),
            transactions,
            StubGateway::reporting("settlement"),
        )
    }

    pub fn with_gateway(gateway: StubGateway) -> Self {
        Self::build(
            Arc::new(InMemoryAddressRepository::new()),
            Arc::new(InMemoryTransactionRepository::new()),
            gateway,
        )
    }

    fn build(
        addresses: Arc<dyn AddressRepository>,
        transactions: Arc<dyn TransactionRepository>,
        gateway: StubGateway,
    ) -> Self {
        let gateway = Arc::new(gateway);
        let state = AppState {
            config: Arc::new(test_config()),
            users: Arc::new(InMemoryUserRepository::new()),
            addresses,
            transactions,
            payments: gateway.clone(),
        };
        let router = create_router().with_state(state.clone());
        Self {
            state,
            gateway,
            router,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<i64>,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user_id {
            let token = issue_token(user_id, JWT_SECRET).unwrap();
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

pub fn address_payload() -> Value {
    serde_json::json!({
        "recipient": "Galih",
        "hp": "21343555",
        "street": "Jl Buntu",
        "subDistrict": "Bangun Rejo",
        "urbanVillage": "Pagar Alam Utara",
        "city": "Pagar Alam",
        "zip": "23413"
    })
}

pub fn assert_failure(body: &Value, code: u16, message: &str) {
    assert_eq!(body["code"], code, "{body}");
    assert_eq!(body["message"], message, "{body}");
    assert_eq!(body["status"], false, "{body}");
    assert!(body["data"].is_null(), "{body}");
}
