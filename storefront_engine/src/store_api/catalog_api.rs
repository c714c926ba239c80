//! Product catalogue and sales reporting.
use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewProduct, Product, ProductSale, ProductUpdate},
    helpers::{require_positive, require_text},
    traits::{CatalogApiError, CatalogManagement},
};

pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn products(&self) -> Result<Vec<Product>, CatalogApiError> {
        self.db.fetch_products().await
    }

    /// Adds a product to the catalogue. The name is required and the price must be positive.
    pub async fn add_product(&self, product: NewProduct) -> Result<Product, CatalogApiError> {
        if let Some(id) = product.product_id {
            require_positive("product_id", id).map_err(CatalogApiError::ValidationError)?;
        }
        validate(&product.product_name, product.price)?;
        let product = self.db.insert_product(product).await?;
        info!("🛍️ Product #{} ({}) added to the catalogue", product.product_id, product.product_name);
        Ok(product)
    }

    pub async fn update_product(&self, product_id: i64, update: ProductUpdate) -> Result<(), CatalogApiError> {
        require_positive("product_id", product_id).map_err(CatalogApiError::ValidationError)?;
        validate(&update.product_name, update.price)?;
        self.db.update_product(product_id, update).await?;
        info!("🛍️ Product #{product_id} updated");
        Ok(())
    }

    pub async fn remove_product(&self, product_id: i64) -> Result<(), CatalogApiError> {
        require_positive("product_id", product_id).map_err(CatalogApiError::ValidationError)?;
        self.db.delete_product(product_id).await?;
        info!("🛍️ Product #{product_id} removed from the catalogue");
        Ok(())
    }

    /// Every order line sold to `user_name`, with the line total worked out from the quantity and unit price.
    pub async fn sales_for_user(&self, user_name: &str) -> Result<Vec<ProductSale>, CatalogApiError> {
        require_text("user_name", user_name).map_err(CatalogApiError::ValidationError)?;
        let sales = self.db.fetch_sales_for_user(user_name).await?;
        trace!("🛍️ {} sales found for {user_name}", sales.len());
        Ok(sales)
    }
}

fn validate(product_name: &str, price: i64) -> Result<(), CatalogApiError> {
    require_text("product_name", product_name)
        .and_then(|_| require_positive("price", price))
        .map_err(CatalogApiError::ValidationError)
}
