//! Carts, orders, credit cards and the purchase history.
//!
//! Methods that act on behalf of a user take the user id as a separate argument. Callers are expected to take it from
//! an authenticated identity rather than from the request body.
use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{
        Cart,
        CartProduct,
        CreditCard,
        NewCart,
        NewCreditCard,
        NewOrder,
        Order,
        OrderHistoryItem,
        OrderProduct,
        UserSummary,
    },
    helpers::{require_positive, require_text},
    traits::{ShoppingApiError, ShoppingManagement},
};

pub struct ShoppingApi<B> {
    db: B,
}

impl<B: Debug> Debug for ShoppingApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ShoppingApi ({:?})", self.db)
    }
}

impl<B> ShoppingApi<B>
where B: ShoppingManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn users(&self) -> Result<Vec<UserSummary>, ShoppingApiError> {
        self.db.fetch_users().await
    }

    pub async fn create_cart(&self, user_id: i64, cart: NewCart) -> Result<Cart, ShoppingApiError> {
        check(require_positive("cart_id", cart.cart_id))?;
        let cart = self.db.insert_cart(user_id, cart.cart_id).await?;
        info!("🛒️ Cart #{} created for user #{user_id}", cart.cart_id);
        Ok(cart)
    }

    pub async fn add_to_cart(&self, item: CartProduct) -> Result<CartProduct, ShoppingApiError> {
        check(
            require_positive("cp_id", item.cp_id)
                .and_then(|_| require_positive("cart_id", item.cart_id))
                .and_then(|_| require_positive("product_id", item.product_id))
                .and_then(|_| require_positive("quantity", item.quantity)),
        )?;
        self.db.insert_cart_product(item).await
    }

    pub async fn cart_for_user(&self, user_id: i64) -> Result<Vec<CartProduct>, ShoppingApiError> {
        self.db.fetch_cart_products_for_user(user_id).await
    }

    pub async fn add_order(&self, order: NewOrder) -> Result<Order, ShoppingApiError> {
        check(
            require_positive("order_id", order.order_id)
                .and_then(|_| require_positive("total_price", order.total_price))
                .and_then(|_| require_text("status", &order.status)),
        )?;
        let order = self.db.insert_order(order).await?;
        info!("📦️ Order #{} created", order.order_id);
        Ok(order)
    }

    pub async fn add_order_product(&self, item: OrderProduct) -> Result<OrderProduct, ShoppingApiError> {
        check(
            require_positive("op_id", item.op_id)
                .and_then(|_| require_positive("order_id", item.order_id))
                .and_then(|_| require_positive("product_id", item.product_id))
                .and_then(|_| require_positive("quantity", item.quantity))
                .and_then(|_| require_positive("price_update", item.price_update)),
        )?;
        if let Some(user_id) = item.user_id {
            check(require_positive("user_id", user_id))?;
        }
        self.db.insert_order_product(item).await
    }

    /// The order lines of `user_id` that belong to completed orders.
    pub async fn history_for_user(&self, user_id: i64) -> Result<Vec<OrderHistoryItem>, ShoppingApiError> {
        self.db.fetch_order_history(user_id).await
    }

    pub async fn add_credit_card(&self, user_id: i64, card: NewCreditCard) -> Result<CreditCard, ShoppingApiError> {
        check(require_positive("card_id", card.card_id).and_then(|_| require_text("card_num", &card.card_num)))?;
        let card = self.db.insert_credit_card(user_id, card).await?;
        info!("💳️ Card #{} added for user #{user_id}", card.card_id);
        Ok(card)
    }

    pub async fn remove_credit_card(&self, card_id: i64) -> Result<(), ShoppingApiError> {
        check(require_positive("card_id", card_id))?;
        self.db.delete_credit_card(card_id).await?;
        info!("💳️ Card #{card_id} removed");
        Ok(())
    }
}

fn check(result: Result<(), String>) -> Result<(), ShoppingApiError> {
    result.map_err(ShoppingApiError::ValidationError)
}
