use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::{json, Value};
use sfs_common::Secret;
use storefront_engine::{
    db_types::{AccountCredentials, CartProduct},
    helpers::hash_password,
    AuthApiError,
};

use super::helpers::{account, bearer, get_auth_config, send, Backends, TEST_HASH_COST};
use crate::auth::TokenVerifier;

fn registration() -> Value {
    json!({
        "user_name": "alice",
        "password": "secret1",
        "email": "a@x.com",
        "phone": "555",
        "address": "addr"
    })
}

fn credentials_for(user_id: i64, user_name: &str, password: &str) -> AccountCredentials {
    let hash = hash_password(password, TEST_HASH_COST).unwrap();
    AccountCredentials { account: account(user_id, user_name), password_hash: Secret::new(hash) }
}

#[actix_web::test]
async fn register_stores_a_hash() {
    let mut backends = Backends::default();
    backends
        .auth
        .expect_insert_account()
        .withf(|r| r.user_name == "alice" && r.email == "a@x.com" && r.password_hash.reveal() != "secret1")
        .times(1)
        .returning(|r| Ok(account(1, &r.user_name)));
    let req = TestRequest::post().uri("/users/register").set_json(registration());
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, r#"{"message":"User registered successfully","username":"alice"}"#);
    assert!(!body.contains("secret1"));
}

#[actix_web::test]
async fn register_with_empty_name_writes_nothing() {
    let mut backends = Backends::default();
    backends.auth.expect_insert_account().never();
    let mut account = registration();
    account["user_name"] = json!("");
    let req = TestRequest::post().uri("/users/register").set_json(account);
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"user_name is required"}"#);
}

#[actix_web::test]
async fn register_duplicate() {
    let mut backends = Backends::default();
    backends.auth.expect_insert_account().returning(|_| Err(AuthApiError::DuplicateAccount));
    let req = TestRequest::post().uri("/users/register").set_json(registration());
    let (status, _) = send(backends, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn register_with_bad_json() {
    let req = TestRequest::post()
        .uri("/users/register")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"user_name\": ");
    let (status, body) = send(Backends::default(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Could not read request body"#), "was: {body}");
}

#[actix_web::test]
async fn login_issues_a_token() {
    let mut backends = Backends::default();
    let credentials = credentials_for(1, "alice", "secret1");
    backends
        .auth
        .expect_fetch_credentials_for_email()
        .withf(|email| email == "a@x.com")
        .returning(move |_| Ok(Some(credentials.clone())));
    let req = TestRequest::post().uri("/users/login").set_json(json!({"email": "a@x.com", "password": "secret1"}));
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    let token = body["token"].as_str().unwrap();
    let claims = TokenVerifier::new(&get_auth_config()).verify(token).unwrap();
    assert_eq!(claims.user_id, 1);
    assert_eq!(claims.user_name, "alice");
}

#[actix_web::test]
async fn login_with_wrong_password() {
    let mut backends = Backends::default();
    let credentials = credentials_for(1, "alice", "secret1");
    backends.auth.expect_fetch_credentials_for_email().returning(move |_| Ok(Some(credentials.clone())));
    let req = TestRequest::post().uri("/users/login").set_json(json!({"email": "a@x.com", "password": "wrongpass"}));
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Invalid email or password"}"#);
    assert!(!body.contains("token"));
}

#[actix_web::test]
async fn login_with_unknown_email() {
    let mut backends = Backends::default();
    backends.auth.expect_fetch_credentials_for_email().returning(|_| Ok(None));
    let req = TestRequest::post().uri("/users/login").set_json(json!({"email": "b@x.com", "password": "secret1"}));
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Invalid email or password"}"#);
}

#[actix_web::test]
async fn login_with_missing_fields() {
    let req = TestRequest::post().uri("/users/login").set_json(json!({"email": "a@x.com"}));
    let (status, _) = send(Backends::default(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Register, log in, then use the token on a protected route.
#[actix_web::test]
async fn alice_registers_logs_in_and_opens_her_cart() {
    let stored_hash = Arc::new(Mutex::new(None::<String>));

    let mut backends = Backends::default();
    let hash = Arc::clone(&stored_hash);
    backends.auth.expect_insert_account().times(1).returning(move |r| {
        *hash.lock().unwrap() = Some(r.password_hash.reveal().clone());
        Ok(account(1, &r.user_name))
    });
    let req = TestRequest::post().uri("/users/register").set_json(registration());
    let (status, _) = send(backends, req).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut backends = Backends::default();
    let hash = Arc::clone(&stored_hash);
    backends.auth.expect_fetch_credentials_for_email().returning(move |_| {
        let hash = hash.lock().unwrap().clone().unwrap_or_default();
        Ok(Some(AccountCredentials { account: account(1, "alice"), password_hash: Secret::new(hash) }))
    });
    let req = TestRequest::post().uri("/users/login").set_json(json!({"email": "a@x.com", "password": "secret1"}));
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    let token = body["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    let mut backends = Backends::default();
    backends
        .shopping
        .expect_fetch_cart_products_for_user()
        .withf(|user_id| *user_id == 1)
        .times(1)
        .returning(|_| Ok(vec![CartProduct { cp_id: 1, cart_id: 2, product_id: 3, quantity: 4 }]));
    let req = TestRequest::get().uri("/users/cart").insert_header(bearer(&token));
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"cp_id":1,"cart_id":2,"product_id":3,"quantity":4}]"#);

    let mut backends = Backends::default();
    backends.auth.expect_fetch_credentials_for_email().returning(move |_| {
        let hash = stored_hash.lock().unwrap().clone().unwrap_or_default();
        Ok(Some(AccountCredentials { account: account(1, "alice"), password_hash: Secret::new(hash) }))
    });
    let req = TestRequest::post().uri("/users/login").set_json(json!({"email": "a@x.com", "password": "wrongpass"}));
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(!body.contains("token"));
}
