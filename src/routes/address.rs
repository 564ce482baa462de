use axum::{Router, extract::State, routing::get};

use crate::{
    dto::address::AddressRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Address,
    response::ApiResponse,
    routes::params::{IdParam, ValidatedJson},
    services::address_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_address).post(create_address))
        .route(
            "/{id}",
            get(get_address_id).put(update_address).delete(delete_address),
        )
}

#[utoipa::path(
    post,
    path = "/api/address",
    request_body = AddressRequest,
    responses(
        (status = 201, description = "Address created", body = ApiResponse<Address>),
        (status = 406, description = "Validate Error"),
        (status = 415, description = "Cannot Bind Data"),
        (status = 500, description = "Cannot Access Database"),
    ),
    security(("bearer_auth" = [])),
    tag = "Address"
)]
pub async fn create_address(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<AddressRequest>,
) -> AppResult<ApiResponse<Address>> {
    address_service::create_address(&state, &user, payload).await
}

#[utoipa::path(
    get,
    path = "/api/address",
    responses(
        (status = 200, description = "Addresses of the current user", body = ApiResponse<Vec<Address>>),
        (status = 500, description = "Cannot Access Database"),
    ),
    security(("bearer_auth" = [])),
    tag = "Address"
)]
pub async fn get_all_address(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<Vec<Address>>> {
    address_service::get_all_address(&state, &user).await
}

#[utoipa::path(
    get,
    path = "/api/address/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address", body = ApiResponse<Address>),
        (status = 404, description = "Data Not Found"),
        (status = 406, description = "Cannot Convert ID"),
    ),
    security(("bearer_auth" = [])),
    tag = "Address"
)]
pub async fn get_address_id(
    State(state): State<AppState>,
    user: AuthUser,
    IdParam(id): IdParam,
) -> AppResult<ApiResponse<Address>> {
    address_service::get_address_id(&state, &user, id).await
}

#[utoipa::path(
    put,
    path = "/api/address/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    request_body = AddressRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<Address>),
        (status = 404, description = "Data Not Found"),
        (status = 406, description = "Cannot Convert ID or Validate Error"),
        (status = 415, description = "Cannot Bind Data"),
    ),
    security(("bearer_auth" = [])),
    tag = "Address"
)]
pub async fn update_address(
    State(state): State<AppState>,
    user: AuthUser,
    IdParam(id): IdParam,
    ValidatedJson(payload): ValidatedJson<AddressRequest>,
) -> AppResult<ApiResponse<Address>> {
    address_service::update_address(&state, &user, id, payload).await
}

#[utoipa::path(
    delete,
    path = "/api/address/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Data Not Found"),
        (status = 406, description = "Cannot Convert ID"),
    ),
    security(("bearer_auth" = [])),
    tag = "Address"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    user: AuthUser,
    IdParam(id): IdParam,
) -> AppResult<ApiResponse<()>> {
    address_service::delete_address(&state, &user, id).await
}
