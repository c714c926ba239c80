use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderHistoryItem, OrderProduct, COMPLETED_ORDER_STATUS},
    traits::ShoppingApiError,
};

pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, ShoppingApiError> {
    let created_at = order.created_at.unwrap_or_else(Utc::now);
    let order = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (order_id, total_price, status, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING order_id, total_price, status, created_at"#,
    )
    .bind(order.order_id)
    .bind(order.total_price)
    .bind(order.status)
    .bind(created_at)
    .fetch_one(conn)
    .await?;
    debug!("📦️ Order #{} saved with status '{}'", order.order_id, order.status);
    Ok(order)
}

pub async fn insert_order_product(
    item: OrderProduct,
    conn: &mut SqliteConnection,
) -> Result<OrderProduct, ShoppingApiError> {
    let item = sqlx::query_as::<_, OrderProduct>(
        r#"
        INSERT INTO order_product (op_id, order_id, product_id, quantity, price_update, user_id)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING op_id, order_id, product_id, quantity, price_update, user_id"#,
    )
    .bind(item.op_id)
    .bind(item.order_id)
    .bind(item.product_id)
    .bind(item.quantity)
    .bind(item.price_update)
    .bind(item.user_id)
    .fetch_one(conn)
    .await?;
    debug!("📦️ Order line #{} added to order #{}", item.op_id, item.order_id);
    Ok(item)
}

pub async fn fetch_order_history(
    user_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderHistoryItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderHistoryItem>(
        r#"
        SELECT op.op_id, op.product_id, op.order_id, op.quantity, p.product_name
        FROM order_product op
            JOIN products p ON p.product_id = op.product_id
            JOIN orders o ON o.order_id = op.order_id
        WHERE op.user_id = ? AND o.status = ?
        ORDER BY op.order_id, op.op_id"#,
    )
    .bind(user_id)
    .bind(COMPLETED_ORDER_STATUS)
    .fetch_all(conn)
    .await
}
