//! `SqliteDatabase` is a concrete implementation of a storefront engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{accounts, carts, credit_cards, new_pool, orders, products};
use crate::{
    db_types::{
        Account,
        AccountCredentials,
        Cart,
        CartProduct,
        CreditCard,
        NewAccountRecord,
        NewCreditCard,
        NewOrder,
        NewProduct,
        Order,
        OrderHistoryItem,
        OrderProduct,
        Product,
        ProductSale,
        ProductUpdate,
        UserSummary,
    },
    traits::{
        AuthApiError,
        CatalogApiError,
        CatalogManagement,
        CredentialManagement,
        ShoppingApiError,
        ShoppingManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl CredentialManagement for SqliteDatabase {
    async fn insert_account(&self, account: NewAccountRecord) -> Result<Account, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        accounts::insert_account(account, &mut conn).await
    }

    async fn fetch_credentials_for_email(&self, email: &str) -> Result<Option<AccountCredentials>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        accounts::fetch_credentials_for_email(email, &mut conn).await
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_products(&mut conn).await
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::insert_product(product, &mut conn).await
    }

    async fn update_product(&self, product_id: i64, update: ProductUpdate) -> Result<(), CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::update_product(product_id, update, &mut conn).await
    }

    async fn delete_product(&self, product_id: i64) -> Result<(), CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::delete_product(product_id, &mut conn).await?;
        debug!("🛍️ Product #{product_id} removed");
        Ok(())
    }

    async fn fetch_sales_for_user(&self, user_name: &str) -> Result<Vec<ProductSale>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_sales_for_user(user_name, &mut conn).await
    }
}

impl ShoppingManagement for SqliteDatabase {
    async fn fetch_users(&self) -> Result<Vec<UserSummary>, ShoppingApiError> {
        let mut conn = self.pool.acquire().await?;
        let users = accounts::fetch_users(&mut conn).await?;
        Ok(users)
    }

    async fn insert_cart(&self, user_id: i64, cart_id: i64) -> Result<Cart, ShoppingApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::insert_cart(user_id, cart_id, &mut conn).await
    }

    async fn insert_cart_product(&self, item: CartProduct) -> Result<CartProduct, ShoppingApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::insert_cart_product(item, &mut conn).await
    }

    async fn fetch_cart_products_for_user(&self, user_id: i64) -> Result<Vec<CartProduct>, ShoppingApiError> {
        let mut conn = self.pool.acquire().await?;
        let items = carts::fetch_cart_products_for_user(user_id, &mut conn).await?;
        trace!("🛒️ User #{user_id} has {} items in their carts", items.len());
        Ok(items)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, ShoppingApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::insert_order(order, &mut conn).await
    }

    async fn insert_order_product(&self, item: OrderProduct) -> Result<OrderProduct, ShoppingApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::insert_order_product(item, &mut conn).await
    }

    async fn fetch_order_history(&self, user_id: i64) -> Result<Vec<OrderHistoryItem>, ShoppingApiError> {
        let mut conn = self.pool.acquire().await?;
        let history = orders::fetch_order_history(user_id, &mut conn).await?;
        Ok(history)
    }

    async fn insert_credit_card(&self, user_id: i64, card: NewCreditCard) -> Result<CreditCard, ShoppingApiError> {
        let mut conn = self.pool.acquire().await?;
        credit_cards::insert_credit_card(user_id, card, &mut conn).await
    }

    async fn delete_credit_card(&self, card_id: i64) -> Result<(), ShoppingApiError> {
        let mut conn = self.pool.acquire().await?;
        credit_cards::delete_credit_card(card_id, &mut conn).await
    }
}

impl SqliteDatabase {
    /// Creates a new database API object. The database file is created if it does not exist yet.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Applies the bundled schema. Migrations that have already run are skipped.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database schema is up to date");
        Ok(())
    }
}
