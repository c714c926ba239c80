use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Cart, CartProduct},
    traits::ShoppingApiError,
};

pub async fn insert_cart(user_id: i64, cart_id: i64, conn: &mut SqliteConnection) -> Result<Cart, ShoppingApiError> {
    let cart = sqlx::query_as::<_, Cart>("INSERT INTO cart (cart_id, user_id) VALUES (?, ?) RETURNING cart_id, user_id")
        .bind(cart_id)
        .bind(user_id)
        .fetch_one(conn)
        .await?;
    debug!("🛒️ Cart #{cart_id} created for user #{user_id}");
    Ok(cart)
}

pub async fn insert_cart_product(
    item: CartProduct,
    conn: &mut SqliteConnection,
) -> Result<CartProduct, ShoppingApiError> {
    let item = sqlx::query_as::<_, CartProduct>(
        r#"
        INSERT INTO cart_product (cp_id, cart_id, product_id, quantity)
        VALUES (?, ?, ?, ?)
        RETURNING cp_id, cart_id, product_id, quantity"#,
    )
    .bind(item.cp_id)
    .bind(item.cart_id)
    .bind(item.product_id)
    .bind(item.quantity)
    .fetch_one(conn)
    .await?;
    debug!("🛒️ {} x product #{} added to cart #{}", item.quantity, item.product_id, item.cart_id);
    Ok(item)
}

pub async fn fetch_cart_products_for_user(
    user_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<CartProduct>, sqlx::Error> {
    sqlx::query_as::<_, CartProduct>(
        r#"
        SELECT cp.cp_id, cp.cart_id, cp.product_id, cp.quantity
        FROM cart_product cp
            JOIN cart c ON cp.cart_id = c.cart_id
        WHERE c.user_id = ?
        ORDER BY cp.cp_id"#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await
}
