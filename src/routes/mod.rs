use axum::{
    Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{response::ApiResponse, state::AppState};

pub mod address;
pub mod auth;
pub mod doc;
pub mod health;
pub mod params;
pub mod transactions;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/address", address::router())
        .nest("/transactions", transactions::router())
}

/// Health check, `/api`, docs and the JSON 404 fallback.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> ApiResponse<()> {
    tracing::debug!(path = %uri.path(), "no route");
    ApiResponse::failure(StatusCode::NOT_FOUND, "Not Found")
}
