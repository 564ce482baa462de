use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        address::AddressRequest,
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        transactions::{CartItemRequest, CreateTransactionRequest, FinishPaymentQuery},
    },
    models::{Address, CartItem, Transaction, TransactionStatus, User},
    payment::{PaymentNotification, PaymentSession},
    response::ApiResponse,
    routes::{address, auth, health, transactions},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        address::create_address,
        address::get_all_address,
        address::get_address_id,
        address::update_address,
        address::delete_address,
        transactions::create_transaction,
        transactions::get_all_transaction,
        transactions::get_transaction_detail,
        transactions::pay_transaction,
        transactions::cancel_transaction,
        transactions::finish_payment,
        transactions::payment_notification
    ),
    components(
        schemas(
            User,
            Address,
            CartItem,
            Transaction,
            TransactionStatus,
            PaymentSession,
            PaymentNotification,
            AddressRequest,
            CreateTransactionRequest,
            CartItemRequest,
            FinishPaymentQuery,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            ApiResponse<Address>,
            ApiResponse<Transaction>,
            ApiResponse<PaymentSession>,
            ApiResponse<User>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Address", description = "Shipping address endpoints"),
        (name = "Transactions", description = "Order and payment endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
