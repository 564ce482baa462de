use crate::{
    dto::address::AddressRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Address,
    response::ApiResponse,
    state::AppState,
};

pub async fn create_address(
    state: &AppState,
    user: &AuthUser,
    payload: AddressRequest,
) -> AppResult<ApiResponse<Address>> {
    let address = state
        .addresses
        .create_address(user.user_id, payload.into())
        .await?;
    tracing::debug!(address_id = address.id, user_id = user.user_id, "address created");
    Ok(ApiResponse::created("Success Create Address", address))
}

pub async fn get_all_address(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Vec<Address>>> {
    let addresses = state.addresses.get_all_address(user.user_id).await?;
    Ok(ApiResponse::ok("Success Get All data", addresses))
}

pub async fn get_address_id(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<Address>> {
    let address = state.addresses.get_address_id(user.user_id, id).await?;
    Ok(ApiResponse::ok("Success Get Data ID", address))
}

pub async fn update_address(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: AddressRequest,
) -> AppResult<ApiResponse<Address>> {
    let address = state
        .addresses
        .update_address(user.user_id, id, payload.into())
        .await?;
    Ok(ApiResponse::ok("Updated", address))
}

pub async fn delete_address(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<()>> {
    state.addresses.delete_address(user.user_id, id).await?;
    tracing::debug!(address_id = id, user_id = user.user_id, "address deleted");
    Ok(ApiResponse::empty("Deleted"))
}
