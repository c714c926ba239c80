use log::debug;
use sqlx::SqliteConnection;

use super::is_foreign_key_violation;
use crate::{
    db_types::{NewProduct, Product, ProductSale, ProductUpdate},
    traits::CatalogApiError,
};

pub async fn fetch_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, CatalogApiError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT product_id, product_name, description, price, img_url FROM products ORDER BY product_id",
    )
    .fetch_all(conn)
    .await?;
    Ok(products)
}

pub async fn insert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<Product, CatalogApiError> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (product_id, product_name, description, price, img_url)
        VALUES (?, ?, ?, ?, ?)
        RETURNING product_id, product_name, description, price, img_url"#,
    )
    .bind(product.product_id)
    .bind(product.product_name)
    .bind(product.description)
    .bind(product.price)
    .bind(product.img_url)
    .fetch_one(conn)
    .await?;
    debug!("🛍️ Product #{} saved", product.product_id);
    Ok(product)
}

pub async fn update_product(
    product_id: i64,
    update: ProductUpdate,
    conn: &mut SqliteConnection,
) -> Result<(), CatalogApiError> {
    let result = sqlx::query("UPDATE products SET product_name = ?, description = ?, price = ? WHERE product_id = ?")
        .bind(update.product_name)
        .bind(update.description)
        .bind(update.price)
        .bind(product_id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CatalogApiError::ProductNotFound(product_id));
    }
    Ok(())
}

pub async fn delete_product(product_id: i64, conn: &mut SqliteConnection) -> Result<(), CatalogApiError> {
    let result = sqlx::query("DELETE FROM products WHERE product_id = ?").bind(product_id).execute(conn).await;
    match result {
        Err(e) if is_foreign_key_violation(&e) => Err(CatalogApiError::ProductInUse(product_id)),
        Err(e) => Err(e.into()),
        Ok(r) if r.rows_affected() == 0 => Err(CatalogApiError::ProductNotFound(product_id)),
        Ok(_) => Ok(()),
    }
}

pub async fn fetch_sales_for_user(
    user_name: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<ProductSale>, CatalogApiError> {
    let sales = sqlx::query_as::<_, ProductSale>(
        r#"
        SELECT
            o.order_id,
            o.created_at,
            u.user_name,
            p.product_name,
            op.quantity,
            op.quantity * op.price_update AS total_price
        FROM orders o
            JOIN order_product op ON o.order_id = op.order_id
            JOIN users u ON op.user_id = u.user_id
            JOIN products p ON op.product_id = p.product_id
        WHERE u.user_name = ?
        ORDER BY o.order_id, op.op_id"#,
    )
    .bind(user_name)
    .fetch_all(conn)
    .await?;
    Ok(sales)
}
