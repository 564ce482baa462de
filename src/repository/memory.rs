//! In-memory repositories. Same contracts as the SeaORM adapters, used as
//! test doubles and for running the API without Postgres.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{AddressRepository, TransactionRepository, UserRepository};
use crate::{
    error::{AppError, AppResult},
    models::{
        Address, CartItem, NewAddress, NewTransaction, NewUser, Transaction, TransactionStatus,
        User, UserCredentials,
    },
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<UserCredentials>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.user.email == new_user.email) {
            return Err(AppError::BadRequest("Email is already taken".into()));
        }

        let user = User {
            id: users.len() as i64 + 1,
            name: new_user.name,
            email: new_user.email,
            created_at: Utc::now(),
        };
        users.push(UserCredentials {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.user.email == email).cloned())
    }
}

#[derive(Default)]
struct AddressTable {
    last_id: i64,
    rows: BTreeMap<i64, Address>,
}

#[derive(Default)]
pub struct InMemoryAddressRepository {
    table: RwLock<AddressTable>,
}

impl InMemoryAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn create_address(&self, user_id: i64, address: NewAddress) -> AppResult<Address> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let now = Utc::now();
        let stored = Address {
            id: table.last_id,
            user_id,
            recipient: address.recipient,
            phone: address.phone,
            street: address.street,
            sub_district: address.sub_district,
            urban_village: address.urban_village,
            city: address.city,
            postal_code: address.postal_code,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_all_address(&self, user_id: i64) -> AppResult<Vec<Address>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_address_id(&self, user_id: i64, id: i64) -> AppResult<Address> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .filter(|a| a.user_id == user_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn update_address(
        &self,
        user_id: i64,
        id: i64,
        address: NewAddress,
    ) -> AppResult<Address> {
        let mut table = self.table.write().await;
        let stored = table
            .rows
            .get_mut(&id)
            .filter(|a| a.user_id == user_id)
            .ok_or(AppError::NotFound)?;

        stored.recipient = address.recipient;
        stored.phone = address.phone;
        stored.street = address.street;
        stored.sub_district = address.sub_district;
        stored.urban_village = address.urban_village;
        stored.city = address.city;
        stored.postal_code = address.postal_code;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_address(&self, user_id: i64, id: i64) -> AppResult<()> {
        let mut table = self.table.write().await;
        match table.rows.get(&id) {
            Some(a) if a.user_id == user_id => {
                table.rows.remove(&id);
                Ok(())
            }
            _ => Err(AppError::NotFound),
        }
    }
}

#[derive(Default)]
struct TransactionTable {
    last_id: i64,
    last_cart_id: i64,
    rows: BTreeMap<i64, Transaction>,
}

impl TransactionTable {
    fn by_order_id(&self, order_id: &str) -> Option<&Transaction> {
        self.rows.values().find(|t| t.order_id == order_id)
    }

    fn by_order_id_mut(&mut self, order_id: &str) -> Option<&mut Transaction> {
        self.rows.values_mut().find(|t| t.order_id == order_id)
    }
}

#[derive(Default)]
pub struct InMemoryTransactionRepository {
    table: RwLock<TransactionTable>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn create_transaction(&self, transaction: NewTransaction) -> AppResult<Transaction> {
        let mut table = self.table.write().await;
        if table.by_order_id(&transaction.order_id).is_some() {
            return Err(AppError::Conflict("Order id already exists".into()));
        }

        table.last_id += 1;
        let id = table.last_id;
        let mut carts = Vec::with_capacity(transaction.carts.len());
        for cart in transaction.carts {
            table.last_cart_id += 1;
            carts.push(CartItem {
                id: table.last_cart_id,
                order_id: id,
                product_id: cart.product_id,
                product_name: cart.product_name,
                price: cart.price,
                quantity: cart.quantity,
            });
        }

        let now = Utc::now();
        let stored = Transaction {
            id,
            order_id: transaction.order_id,
            user_id: transaction.user_id,
            address_id: transaction.address_id,
            payment_method: transaction.payment_method,
            total_bill: transaction.total_bill,
            status: TransactionStatus::Created,
            created_at: now,
            updated_at: now,
            carts,
        };
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_all_transaction(&self, user_id: i64) -> AppResult<Vec<Transaction>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_transaction_detail(
        &self,
        user_id: i64,
        order_id: &str,
    ) -> AppResult<Transaction> {
        let table = self.table.read().await;
        table
            .by_order_id(order_id)
            .filter(|t| t.user_id == user_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn find_by_order_id(&self, order_id: &str) -> AppResult<Transaction> {
        let table = self.table.read().await;
        table
            .by_order_id(order_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn update_status(
        &self,
        order_id: &str,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> AppResult<Transaction> {
        let mut table = self.table.write().await;
        let stored = table.by_order_id_mut(order_id).ok_or(AppError::NotFound)?;
        if stored.status != from {
            return Err(AppError::Conflict(format!(
                "Transaction is already {}",
                stored.status
            )));
        }

        stored.status = to;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}
