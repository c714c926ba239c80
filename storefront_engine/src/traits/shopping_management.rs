use thiserror::Error;

use crate::db_types::{
    Cart,
    CartProduct,
    CreditCard,
    NewCreditCard,
    NewOrder,
    Order,
    OrderHistoryItem,
    OrderProduct,
    UserSummary,
};

#[derive(Debug, Clone, Error)]
pub enum ShoppingApiError {
    #[error("Invalid request data. {0}")]
    ValidationError(String),
    #[error("A record with this id already exists")]
    DuplicateRecord,
    #[error("The request refers to a user, cart, order or product that does not exist")]
    UnknownReference,
    #[error("{0} does not exist")]
    RecordNotFound(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for ShoppingApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(ref de) if de.is_unique_violation() => ShoppingApiError::DuplicateRecord,
            sqlx::Error::Database(ref de) if de.is_foreign_key_violation() => ShoppingApiError::UnknownReference,
            _ => ShoppingApiError::DatabaseError(e.to_string()),
        }
    }
}

/// The `ShoppingManagement` trait defines behaviour for everything a customer does after browsing the catalogue:
/// carts, orders, payment cards and the purchase history.
#[allow(async_fn_in_trait)]
pub trait ShoppingManagement {
    /// Fetches the id and name of every registered user.
    async fn fetch_users(&self) -> Result<Vec<UserSummary>, ShoppingApiError>;

    async fn insert_cart(&self, user_id: i64, cart_id: i64) -> Result<Cart, ShoppingApiError>;

    async fn insert_cart_product(&self, item: CartProduct) -> Result<CartProduct, ShoppingApiError>;

    /// Fetches the contents of every cart belonging to the given user.
    async fn fetch_cart_products_for_user(&self, user_id: i64) -> Result<Vec<CartProduct>, ShoppingApiError>;

    async fn insert_order(&self, order: NewOrder) -> Result<Order, ShoppingApiError>;

    async fn insert_order_product(&self, item: OrderProduct) -> Result<OrderProduct, ShoppingApiError>;

    /// Fetches the order lines of the given user that belong to completed orders.
    async fn fetch_order_history(&self, user_id: i64) -> Result<Vec<OrderHistoryItem>, ShoppingApiError>;

    async fn insert_credit_card(&self, user_id: i64, card: NewCreditCard) -> Result<CreditCard, ShoppingApiError>;

    /// Removes the card. Returns [`ShoppingApiError::RecordNotFound`] if no card has the given id.
    async fn delete_credit_card(&self, card_id: i64) -> Result<(), ShoppingApiError>;
}
