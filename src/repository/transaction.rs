use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::TransactionRepository;
use crate::{
    db::OrmConn,
    entity::{
        carts::{ActiveModel as CartActive, Column as CartCol, Entity as Carts, Model as CartModel},
        transactions::{
            ActiveModel as TransactionActive, Column as TransactionCol, Entity as Transactions,
            Model as TransactionModel,
        },
    },
    error::{AppError, AppResult},
    models::{CartItem, NewTransaction, Transaction, TransactionStatus},
};

#[derive(Clone)]
pub struct SeaOrmTransactionRepository {
    db: OrmConn,
}

impl SeaOrmTransactionRepository {
    pub fn new(db: OrmConn) -> Self {
        Self { db }
    }

    async fn find_one(&self, condition: Condition) -> AppResult<Transaction> {
        let order = Transactions::find()
            .filter(condition.add(TransactionCol::DeletedAt.is_null()))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut carts = self.load_carts(vec![order.id]).await?;
        let items = carts.remove(&order.id).unwrap_or_default();
        transaction_from_entity(order, items)
    }

    async fn load_carts(&self, order_ids: Vec<i64>) -> AppResult<HashMap<i64, Vec<CartItem>>> {
        let mut grouped: HashMap<i64, Vec<CartItem>> = HashMap::new();
        if order_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = Carts::find()
            .filter(
                Condition::all()
                    .add(CartCol::OrderId.is_in(order_ids))
                    .add(CartCol::DeletedAt.is_null()),
            )
            .order_by_asc(CartCol::Id)
            .all(&self.db)
            .await?;

        for row in rows {
            grouped
                .entry(row.order_id)
                .or_default()
                .push(cart_item_from_entity(row));
        }
        Ok(grouped)
    }
}

#[async_trait]
impl TransactionRepository for SeaOrmTransactionRepository {
    async fn create_transaction(&self, transaction: NewTransaction) -> AppResult<Transaction> {
        let txn = self.db.begin().await?;

        let order = TransactionActive {
            id: NotSet,
            order_id: Set(transaction.order_id),
            user_id: Set(transaction.user_id),
            address_id: Set(transaction.address_id),
            payment_method: Set(transaction.payment_method),
            total_bill: Set(transaction.total_bill),
            status: Set(TransactionStatus::Created.as_str().into()),
            created_at: NotSet,
            updated_at: NotSet,
            deleted_at: Set(None),
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(transaction.carts.len());
        for cart in transaction.carts {
            let item = CartActive {
                id: NotSet,
                order_id: Set(order.id),
                product_id: Set(cart.product_id),
                product_name: Set(cart.product_name),
                price: Set(cart.price),
                quantity: Set(cart.quantity),
                created_at: NotSet,
                deleted_at: Set(None),
            }
            .insert(&txn)
            .await?;
            items.push(cart_item_from_entity(item));
        }

        txn.commit().await?;

        transaction_from_entity(order, items)
    }

    async fn get_all_transaction(&self, user_id: i64) -> AppResult<Vec<Transaction>> {
        let orders = Transactions::find()
            .filter(
                Condition::all()
                    .add(TransactionCol::UserId.eq(user_id))
                    .add(TransactionCol::DeletedAt.is_null()),
            )
            .order_by_asc(TransactionCol::Id)
            .all(&self.db)
            .await?;

        let mut carts = self
            .load_carts(orders.iter().map(|order| order.id).collect())
            .await?;

        orders
            .into_iter()
            .map(|order| {
                let items = carts.remove(&order.id).unwrap_or_default();
                transaction_from_entity(order, items)
            })
            .collect()
    }

    async fn get_transaction_detail(
        &self,
        user_id: i64,
        order_id: &str,
    ) -> AppResult<Transaction> {
        self.find_one(
            Condition::all()
                .add(TransactionCol::UserId.eq(user_id))
                .add(TransactionCol::OrderId.eq(order_id)),
        )
        .await
    }

    async fn find_by_order_id(&self, order_id: &str) -> AppResult<Transaction> {
        self.find_one(Condition::all().add(TransactionCol::OrderId.eq(order_id)))
            .await
    }

    async fn update_status(
        &self,
        order_id: &str,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> AppResult<Transaction> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let result = Transactions::update_many()
            .col_expr(TransactionCol::Status, Expr::value(to.as_str()))
            .col_expr(TransactionCol::UpdatedAt, Expr::value(now))
            .filter(
                Condition::all()
                    .add(TransactionCol::OrderId.eq(order_id))
                    .add(TransactionCol::Status.eq(from.as_str()))
                    .add(TransactionCol::DeletedAt.is_null()),
            )
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            let current = self.find_by_order_id(order_id).await?;
            return Err(AppError::Conflict(format!(
                "Transaction is already {}",
                current.status
            )));
        }

        self.find_by_order_id(order_id).await
    }
}

fn transaction_from_entity(model: TransactionModel, carts: Vec<CartItem>) -> AppResult<Transaction> {
    let status = model
        .status
        .parse::<TransactionStatus>()
        .map_err(|err| AppError::Internal(anyhow::anyhow!(err)))?;

    Ok(Transaction {
        id: model.id,
        order_id: model.order_id,
        user_id: model.user_id,
        address_id: model.address_id,
        payment_method: model.payment_method,
        total_bill: model.total_bill,
        status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        carts,
    })
}

fn cart_item_from_entity(model: CartModel) -> CartItem {
    CartItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        product_name: model.product_name,
        price: model.price,
        quantity: model.quantity,
    }
}
