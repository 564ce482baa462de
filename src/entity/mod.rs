pub mod addresses;
pub mod carts;
pub mod transactions;
pub mod users;

pub use addresses::Entity as Addresses;
pub use carts::Entity as Carts;
pub use transactions::Entity as Transactions;
pub use users::Entity as Users;
