use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};

use crate::{
    dto::transactions::{CreateTransactionRequest, FinishPaymentQuery},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Transaction,
    payment::{PaymentNotification, PaymentSession},
    response::ApiResponse,
    routes::params::ValidatedJson,
    services::transaction_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_transaction).post(create_transaction))
        .route("/finish_payment", get(finish_payment))
        .route("/notification", post(payment_notification))
        .route("/{order_id}", get(get_transaction_detail))
        .route("/{order_id}/pay", post(pay_transaction))
        .route("/{order_id}/cancel", post(cancel_transaction))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<Transaction>),
        (status = 404, description = "Address not found"),
        (status = 406, description = "Validate Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTransactionRequest>,
) -> AppResult<ApiResponse<Transaction>> {
    transaction_service::create_transaction(&state, &user, payload).await
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    responses(
        (status = 200, description = "Orders of the current user", body = ApiResponse<Vec<Transaction>>),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn get_all_transaction(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<Vec<Transaction>>> {
    transaction_service::get_all_transaction(&state, &user).await
}

#[utoipa::path(
    get,
    path = "/api/transactions/{order_id}",
    params(("order_id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order detail", body = ApiResponse<Transaction>),
        (status = 404, description = "Data Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn get_transaction_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<String>,
) -> AppResult<ApiResponse<Transaction>> {
    transaction_service::get_transaction_detail(&state, &user, &order_id).await
}

#[utoipa::path(
    post,
    path = "/api/transactions/{order_id}/pay",
    params(("order_id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payment session", body = ApiResponse<PaymentSession>),
        (status = 404, description = "Data Not Found"),
        (status = 409, description = "Order is not awaiting payment"),
        (status = 502, description = "Payment Gateway Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn pay_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<String>,
) -> AppResult<ApiResponse<PaymentSession>> {
    transaction_service::pay_transaction(&state, &user, &order_id).await
}

#[utoipa::path(
    post,
    path = "/api/transactions/{order_id}/cancel",
    params(("order_id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<Transaction>),
        (status = 404, description = "Data Not Found"),
        (status = 409, description = "Order can no longer be cancelled"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn cancel_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<String>,
) -> AppResult<ApiResponse<Transaction>> {
    transaction_service::cancel_transaction(&state, &user, &order_id).await
}

#[utoipa::path(
    get,
    path = "/api/transactions/finish_payment",
    params(
        ("order_id" = String, Query, description = "Order ID"),
        ("status_code" = Option<String>, Query, description = "Gateway status code"),
        ("transaction_status" = Option<String>, Query, description = "Gateway transaction status"),
    ),
    responses(
        (status = 200, description = "Order after applying the gateway status", body = ApiResponse<Transaction>),
        (status = 404, description = "Data Not Found"),
        (status = 409, description = "Reported status conflicts with the order"),
    ),
    tag = "Transactions"
)]
pub async fn finish_payment(
    State(state): State<AppState>,
    query: Result<Query<FinishPaymentQuery>, QueryRejection>,
) -> AppResult<ApiResponse<Transaction>> {
    let Query(query) =
        query.map_err(|_| AppError::BadRequest("order_id is required".into()))?;
    transaction_service::finish_payment(&state, &query.order_id).await
}

#[utoipa::path(
    post,
    path = "/api/transactions/notification",
    request_body = PaymentNotification,
    responses(
        (status = 200, description = "Order after applying the gateway status", body = ApiResponse<Transaction>),
        (status = 403, description = "Invalid Signature"),
        (status = 404, description = "Data Not Found"),
    ),
    tag = "Transactions"
)]
pub async fn payment_notification(
    State(state): State<AppState>,
    payload: Result<Json<PaymentNotification>, JsonRejection>,
) -> AppResult<ApiResponse<Transaction>> {
    let Json(notification) = payload.map_err(|rejection| AppError::Bind(rejection.body_text()))?;
    transaction_service::handle_notification(&state, notification).await
}
