//! Persistence capabilities. Services only see these traits; `AppState`
//! decides at construction whether they are backed by SeaORM or by the
//! in-memory store.

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{
        Address, NewAddress, NewTransaction, NewUser, Transaction, TransactionStatus, User,
        UserCredentials,
    },
};

pub mod address;
pub mod memory;
pub mod transaction;
pub mod user;

pub use address::SeaOrmAddressRepository;
pub use memory::{InMemoryAddressRepository, InMemoryTransactionRepository, InMemoryUserRepository};
pub use transaction::SeaOrmTransactionRepository;
pub use user::SeaOrmUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>>;
}

#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn create_address(&self, user_id: i64, address: NewAddress) -> AppResult<Address>;

    async fn get_all_address(&self, user_id: i64) -> AppResult<Vec<Address>>;

    /// Fails with `NotFound` unless the address exists and belongs to `user_id`.
    async fn get_address_id(&self, user_id: i64, id: i64) -> AppResult<Address>;

    async fn update_address(
        &self,
        user_id: i64,
        id: i64,
        address: NewAddress,
    ) -> AppResult<Address>;

    async fn delete_address(&self, user_id: i64, id: i64) -> AppResult<()>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Stores the order in `created` state together with its cart items.
    async fn create_transaction(&self, transaction: NewTransaction) -> AppResult<Transaction>;

    /// Orders of a user with their cart items, oldest first.
    async fn get_all_transaction(&self, user_id: i64) -> AppResult<Vec<Transaction>>;

    async fn get_transaction_detail(
        &self,
        user_id: i64,
        order_id: &str,
    ) -> AppResult<Transaction>;

    async fn find_by_order_id(&self, order_id: &str) -> AppResult<Transaction>;

    /// Moves the order from `from` to `to` only if it is still in `from`;
    /// otherwise fails with `Conflict` (or `NotFound` for unknown orders).
    async fn update_status(
        &self,
        order_id: &str,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> AppResult<Transaction>;
}
