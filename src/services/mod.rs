pub mod address_service;
pub mod auth_service;
pub mod transaction_service;
