use actix_web::{http::StatusCode, test::TestRequest};
use chrono::Utc;
use serde_json::json;
use storefront_engine::{
    db_types::{Cart, CreditCard, Order, OrderHistoryItem, OrderProduct, UserSummary},
    ShoppingApiError,
};

use super::helpers::{bearer, issue_token, send, Backends};

#[actix_web::test]
async fn list_users() {
    let mut backends = Backends::default();
    backends.shopping.expect_fetch_users().returning(|| {
        Ok(vec![UserSummary { user_id: 1, user_name: "alice".into() }, UserSummary {
            user_id: 2,
            user_name: "bob".into(),
        }])
    });
    let (status, body) = send(backends, TestRequest::get().uri("/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"user_id":1,"user_name":"alice"},{"user_id":2,"user_name":"bob"}]"#);
}

#[actix_web::test]
async fn create_cart_for_token_owner() {
    let mut backends = Backends::default();
    backends
        .shopping
        .expect_insert_cart()
        .withf(|user_id, cart_id| *user_id == 5 && *cart_id == 12)
        .times(1)
        .returning(|user_id, cart_id| Ok(Cart { cart_id, user_id }));
    let token = issue_token(5, "carol");
    let req = TestRequest::post().uri("/users/cart").insert_header(bearer(&token)).set_json(json!({"cart_id": 12}));
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, r#"{"cart_id":12,"user_id":5}"#);
}

#[actix_web::test]
async fn add_product_to_cart() {
    let mut backends = Backends::default();
    backends.shopping.expect_insert_cart_product().times(1).returning(Ok);
    let item = json!({"cp_id": 1, "cart_id": 12, "product_id": 3, "quantity": 2});
    let (status, body) = send(backends, TestRequest::post().uri("/addProduct-cart").set_json(item)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, r#"{"cp_id":1,"cart_id":12,"product_id":3,"quantity":2}"#);
}

#[actix_web::test]
async fn cart_quantity_must_be_positive() {
    let mut backends = Backends::default();
    backends.shopping.expect_insert_cart_product().never();
    let item = json!({"cp_id": 1, "cart_id": 12, "product_id": 3, "quantity": 0});
    let (status, _) = send(backends, TestRequest::post().uri("/addProduct-cart").set_json(item)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn cart_product_for_unknown_cart() {
    let mut backends = Backends::default();
    backends.shopping.expect_insert_cart_product().returning(|_| Err(ShoppingApiError::UnknownReference));
    let item = json!({"cp_id": 1, "cart_id": 99, "product_id": 3, "quantity": 1});
    let (status, _) = send(backends, TestRequest::post().uri("/addProduct-cart").set_json(item)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn add_order() {
    let mut backends = Backends::default();
    backends.shopping.expect_insert_order().withf(|o| o.status == "completed").times(1).returning(|o| {
        Ok(Order {
            order_id: o.order_id,
            total_price: o.total_price,
            status: o.status,
            created_at: o.created_at.unwrap_or_else(Utc::now),
        })
    });
    let order = json!({"order_id": 10, "total_price": 450, "status": "completed"});
    let (status, body) = send(backends, TestRequest::post().uri("/users/addOrder").set_json(order)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains(r#""order_id":10"#), "was: {body}");
}

#[actix_web::test]
async fn order_needs_a_status() {
    let mut backends = Backends::default();
    backends.shopping.expect_insert_order().never();
    let order = json!({"order_id": 10, "total_price": 450, "status": ""});
    let (status, body) = send(backends, TestRequest::post().uri("/users/addOrder").set_json(order)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"status is required"}"#);
}

#[actix_web::test]
async fn add_order_product() {
    let mut backends = Backends::default();
    backends.shopping.expect_insert_order_product().times(1).returning(Ok);
    let line = json!({"op_id": 1, "order_id": 10, "product_id": 3, "quantity": 2, "price_update": 150, "user_id": 5});
    let (status, body) = send(backends, TestRequest::post().uri("/users/addOrder-product").set_json(line)).await;
    assert_eq!(status, StatusCode::CREATED);
    let expected: OrderProduct = serde_json::from_str(&body).unwrap();
    assert_eq!(expected.user_id, Some(5));
}

#[actix_web::test]
async fn duplicate_order_product() {
    let mut backends = Backends::default();
    backends.shopping.expect_insert_order_product().returning(|_| Err(ShoppingApiError::DuplicateRecord));
    let line = json!({"op_id": 1, "order_id": 10, "product_id": 3, "quantity": 2, "price_update": 150});
    let (status, _) = send(backends, TestRequest::post().uri("/users/addOrder-product").set_json(line)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn history_for_token_owner() {
    let mut backends = Backends::default();
    backends.shopping.expect_fetch_order_history().withf(|user_id| *user_id == 5).times(1).returning(|_| {
        Ok(vec![OrderHistoryItem { op_id: 1, product_id: 3, order_id: 10, quantity: 2, product_name: "Widget".into() }])
    });
    let token = issue_token(5, "carol");
    let (status, body) = send(backends, TestRequest::get().uri("/history").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"op_id":1,"product_id":3,"order_id":10,"quantity":2,"product_name":"Widget"}]"#);
}

#[actix_web::test]
async fn credit_card_owner_comes_from_the_token() {
    let mut backends = Backends::default();
    backends
        .shopping
        .expect_insert_credit_card()
        .withf(|user_id, card| *user_id == 5 && card.card_id == 7)
        .times(1)
        .returning(|user_id, card| Ok(CreditCard { card_id: card.card_id, user_id, card_num: card.card_num }));
    let token = issue_token(5, "carol");
    let card = json!({"card_id": 7, "card_num": "4111111111111111", "user_id": 1});
    let req = TestRequest::post().uri("/add-credit").insert_header(bearer(&token)).set_json(card);
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains(r#""user_id":5"#), "was: {body}");
}

#[actix_web::test]
async fn delete_credit_card() {
    let mut backends = Backends::default();
    backends.shopping.expect_delete_credit_card().withf(|id| *id == 7).times(1).returning(|_| Ok(()));
    let (status, _) = send(backends, TestRequest::delete().uri("/credit/7")).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn delete_missing_credit_card() {
    let mut backends = Backends::default();
    backends
        .shopping
        .expect_delete_credit_card()
        .returning(|id| Err(ShoppingApiError::RecordNotFound(format!("Credit card #{id}"))));
    let (status, body) = send(backends, TestRequest::delete().uri("/credit/7")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"The data was not found. Credit card #7 does not exist"}"#);
}
