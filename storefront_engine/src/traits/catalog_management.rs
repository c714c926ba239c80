use thiserror::Error;

use crate::db_types::{NewProduct, Product, ProductSale, ProductUpdate};

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Invalid product data. {0}")]
    ValidationError(String),
    #[error("Product #{0} does not exist")]
    ProductNotFound(i64),
    #[error("A product with this id already exists")]
    DuplicateProduct,
    #[error("Product #{0} is referenced by existing orders and cannot be removed")]
    ProductInUse(i64),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CatalogApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(ref de) if de.is_unique_violation() => CatalogApiError::DuplicateProduct,
            _ => CatalogApiError::DatabaseError(e.to_string()),
        }
    }
}

/// The `CatalogManagement` trait defines behaviour for managing the product catalogue.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogApiError>;

    /// Inserts the product and returns it as stored, including the assigned id if none was given.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogApiError>;

    /// Updates the name, description and price of the product. Returns [`CatalogApiError::ProductNotFound`] if no
    /// product has the given id.
    async fn update_product(&self, product_id: i64, update: ProductUpdate) -> Result<(), CatalogApiError>;

    /// Removes the product. Returns [`CatalogApiError::ProductNotFound`] if no product has the given id.
    async fn delete_product(&self, product_id: i64) -> Result<(), CatalogApiError>;

    /// Fetches every order line sold to the user with the given name.
    async fn fetch_sales_for_user(&self, user_name: &str) -> Result<Vec<ProductSale>, CatalogApiError>;
}
