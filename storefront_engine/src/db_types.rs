use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sfs_common::Secret;
use sqlx::FromRow;

//--------------------------------------       Account         ---------------------------------------------------------
/// A registered user account.
///
/// This is the public face of an account. The password hash is never part of it; see [`AccountCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub user_id: i64,
    pub user_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// An account together with its stored password hash. Only the credential store deals in this type.
#[derive(Debug, Clone)]
pub struct AccountCredentials {
    pub account: Account,
    pub password_hash: Secret<String>,
}

/// A registration request, as supplied by the client. The password is still in plaintext at this point.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAccount {
    /// Account ids may be assigned by the caller. If omitted, the database assigns one.
    #[serde(default)]
    pub user_id: Option<i64>,
    pub user_name: String,
    pub password: Secret<String>,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub address: String,
}

impl NewAccount {
    pub fn new<S: Into<String>>(user_name: S, password: S, email: S, phone: S, address: S) -> Self {
        Self {
            user_id: None,
            user_name: user_name.into(),
            password: Secret::new(password.into()),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// The row that actually gets written when an account is registered.
#[derive(Debug, Clone)]
pub struct NewAccountRecord {
    pub user_id: Option<i64>,
    pub user_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password_hash: Secret<String>,
    pub created_at: DateTime<Utc>,
}

/// The id and name of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub user_id: i64,
    pub user_name: String,
}

//--------------------------------------       Products        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    pub description: String,
    pub price: i64,
    pub img_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub product_id: Option<i64>,
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub img_url: String,
}

/// The mutable fields of a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
}

/// One line of the sales report for a given user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProductSale {
    pub order_id: i64,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: i64,
}

//--------------------------------------        Carts          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Cart {
    pub cart_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCart {
    pub cart_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CartProduct {
    pub cp_id: i64,
    pub cart_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

//--------------------------------------     Credit cards      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CreditCard {
    pub card_id: i64,
    pub user_id: i64,
    pub card_num: String,
}

/// A card to be attached to the authenticated user. The owner always comes from the access token, never the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCreditCard {
    pub card_id: i64,
    pub card_num: String,
}

//--------------------------------------        Orders         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i64,
    pub total_price: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_id: i64,
    pub total_price: i64,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OrderProduct {
    pub op_id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price_update: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// A completed order line, as shown in a user's purchase history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OrderHistoryItem {
    pub op_id: i64,
    pub product_id: i64,
    pub order_id: i64,
    pub quantity: i64,
    pub product_name: String,
}

/// Order lines with this status show up in the purchase history.
pub const COMPLETED_ORDER_STATUS: &str = "completed";
