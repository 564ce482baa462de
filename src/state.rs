use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::OrmConn,
    payment::{GatewayError, MidtransClient, PaymentGateway},
    repository::{
        AddressRepository, SeaOrmAddressRepository, SeaOrmTransactionRepository,
        SeaOrmUserRepository, TransactionRepository, UserRepository,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub payments: Arc<dyn PaymentGateway>,
}

impl AppState {
    /// Wires the SeaORM repositories and the Midtrans client.
    pub fn with_orm(config: AppConfig, orm: OrmConn) -> Result<Self, GatewayError> {
        let payments = MidtransClient::new(config.gateway.clone())?;
        Ok(Self {
            config: Arc::new(config),
            users: Arc::new(SeaOrmUserRepository::new(orm.clone())),
            addresses: Arc::new(SeaOrmAddressRepository::new(orm.clone())),
            transactions: Arc::new(SeaOrmTransactionRepository::new(orm)),
            payments: Arc::new(payments),
        })
    }
}
