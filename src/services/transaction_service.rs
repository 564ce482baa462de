use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::transactions::CreateTransactionRequest,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{NewCartItem, NewTransaction, Transaction, TransactionStatus},
    payment::{GatewayError, PaymentNotification, PaymentSession},
    response::ApiResponse,
    state::AppState,
};

pub async fn create_transaction(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTransactionRequest,
) -> AppResult<ApiResponse<Transaction>> {
    for item in &payload.carts {
        item.validate()?;
    }

    // The delivery address must belong to the buyer.
    state
        .addresses
        .get_address_id(user.user_id, payload.address_id)
        .await?;

    let carts: Vec<NewCartItem> = payload.carts.into_iter().map(Into::into).collect();
    let total_bill = total_bill(&carts)?;

    let transaction = state
        .transactions
        .create_transaction(NewTransaction {
            order_id: build_order_id(Uuid::new_v4()),
            user_id: user.user_id,
            address_id: payload.address_id,
            payment_method: payload.payment_method.trim().to_string(),
            total_bill,
            carts,
        })
        .await?;

    tracing::info!(
        order_id = %transaction.order_id,
        user_id = user.user_id,
        total_bill,
        "transaction created"
    );
    Ok(ApiResponse::created("Success Create Transaction", transaction))
}

pub async fn get_all_transaction(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Vec<Transaction>>> {
    let transactions = state.transactions.get_all_transaction(user.user_id).await?;
    Ok(ApiResponse::ok("Success Get All Transaction", transactions))
}

pub async fn get_transaction_detail(
    state: &AppState,
    user: &AuthUser,
    order_id: &str,
) -> AppResult<ApiResponse<Transaction>> {
    let transaction = state
        .transactions
        .get_transaction_detail(user.user_id, order_id)
        .await?;
    Ok(ApiResponse::ok("Success Get Transaction Detail", transaction))
}

/// Opens a gateway payment session. The stored status only changes once the
/// gateway reports back through `finish_payment`.
pub async fn pay_transaction(
    state: &AppState,
    user: &AuthUser,
    order_id: &str,
) -> AppResult<ApiResponse<PaymentSession>> {
    let transaction = state
        .transactions
        .get_transaction_detail(user.user_id, order_id)
        .await?;

    if transaction.status != TransactionStatus::Created {
        return Err(AppError::Conflict(format!(
            "Transaction is already {}",
            transaction.status
        )));
    }

    let session = state
        .payments
        .create_transaction(&transaction.order_id, transaction.total_bill)
        .await?;

    Ok(ApiResponse::ok("Success Request Payment", session))
}

/// Only orders still in `created` can be cancelled.
pub async fn cancel_transaction(
    state: &AppState,
    user: &AuthUser,
    order_id: &str,
) -> AppResult<ApiResponse<Transaction>> {
    let transaction = state
        .transactions
        .get_transaction_detail(user.user_id, order_id)
        .await?;

    if !transaction
        .status
        .can_transition_to(TransactionStatus::Cancelled)
    {
        return Err(AppError::Conflict(format!(
            "Transaction cannot be cancelled once {}",
            transaction.status
        )));
    }

    let cancelled = state
        .transactions
        .update_status(
            &transaction.order_id,
            transaction.status,
            TransactionStatus::Cancelled,
        )
        .await?;

    tracing::info!(order_id = %cancelled.order_id, user_id = user.user_id, "transaction cancelled");
    Ok(ApiResponse::ok("Transaction Cancelled", cancelled))
}

/// Applies the payment outcome reported by the gateway's status endpoint.
pub async fn finish_payment(
    state: &AppState,
    order_id: &str,
) -> AppResult<ApiResponse<Transaction>> {
    let transaction = state.transactions.find_by_order_id(order_id).await?;
    let report = match state.payments.payment_status(&transaction.order_id).await {
        Ok(report) => report,
        // The buyer left Snap before paying, so the gateway has no record yet.
        Err(GatewayError::Rejected { status: 404, .. }) => {
            tracing::info!(order_id, "gateway has no payment for order yet");
            return Ok(ApiResponse::ok("Payment Status Unchanged", transaction));
        }
        Err(err) => return Err(err.into()),
    };

    let next = match report.outcome() {
        Some(next) if next != transaction.status => next,
        _ => {
            tracing::info!(
                order_id,
                transaction_status = %report.transaction_status,
                current = %transaction.status,
                "payment report leaves status unchanged"
            );
            return Ok(ApiResponse::ok("Payment Status Unchanged", transaction));
        }
    };

    if !transaction.status.can_transition_to(next) {
        tracing::warn!(
            order_id,
            current = %transaction.status,
            reported = %report.transaction_status,
            "payment report conflicts with transaction status"
        );
        return Err(AppError::Conflict(format!(
            "Transaction is already {}",
            transaction.status
        )));
    }

    let updated = state
        .transactions
        .update_status(&transaction.order_id, transaction.status, next)
        .await?;

    tracing::info!(order_id, status = %updated.status, "payment status updated");
    Ok(ApiResponse::ok("Payment Status Updated", updated))
}

/// Entry point for gateway HTTP notifications. The body is only trusted for
/// the order id; the outcome itself is re-read from the gateway.
pub async fn handle_notification(
    state: &AppState,
    notification: PaymentNotification,
) -> AppResult<ApiResponse<Transaction>> {
    if !state.payments.verify_notification(&notification) {
        tracing::warn!(order_id = %notification.order_id, "notification signature mismatch");
        return Err(AppError::InvalidSignature);
    }
    finish_payment(state, &notification.order_id).await
}

fn total_bill(carts: &[NewCartItem]) -> AppResult<i64> {
    carts
        .iter()
        .try_fold(0_i64, |total, item| {
            item.subtotal().and_then(|subtotal| total.checked_add(subtotal))
        })
        .ok_or_else(|| AppError::BadRequest("Total bill is out of range".into()))
}

fn build_order_id(id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    format!("ORDER-{}-{}", date, id.simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: i64, quantity: i32) -> NewCartItem {
        NewCartItem {
            product_id: 1,
            product_name: "Kopi".into(),
            price,
            quantity,
        }
    }

    #[test]
    fn total_bill_sums_price_times_quantity() {
        let carts = vec![item(25_000, 2), item(50_000, 1)];
        assert_eq!(total_bill(&carts).unwrap(), 100_000);
    }

    #[test]
    fn total_bill_overflow_is_rejected() {
        let carts = vec![item(i64::MAX, 1), item(1, 1)];
        assert!(matches!(total_bill(&carts), Err(AppError::BadRequest(_))));
        assert!(total_bill(&[item(i64::MAX, 2)]).is_err());
    }

    #[test]
    fn order_id_fits_gateway_limit() {
        let order_id = build_order_id(Uuid::new_v4());
        assert!(order_id.starts_with("ORDER-"));
        assert!(order_id.len() <= 50, "{order_id}");
    }
}
