use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{CreditCard, NewCreditCard},
    traits::ShoppingApiError,
};

pub async fn insert_credit_card(
    user_id: i64,
    card: NewCreditCard,
    conn: &mut SqliteConnection,
) -> Result<CreditCard, ShoppingApiError> {
    let card = sqlx::query_as::<_, CreditCard>(
        "INSERT INTO credit_card (card_id, user_id, card_num) VALUES (?, ?, ?) RETURNING card_id, user_id, card_num",
    )
    .bind(card.card_id)
    .bind(user_id)
    .bind(card.card_num)
    .fetch_one(conn)
    .await?;
    // Card numbers stay out of the logs.
    debug!("💳️ Card #{} added for user #{user_id}", card.card_id);
    Ok(card)
}

pub async fn delete_credit_card(card_id: i64, conn: &mut SqliteConnection) -> Result<(), ShoppingApiError> {
    let result = sqlx::query("DELETE FROM credit_card WHERE card_id = ?").bind(card_id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(ShoppingApiError::RecordNotFound(format!("Credit card #{card_id}")));
    }
    debug!("💳️ Card #{card_id} removed");
    Ok(())
}
