//! The bearer token gate, tested around a counting handler so that we can see whether the wrapped operation ran.
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use actix_web::{http::StatusCode, test, test::TestRequest, web, App, HttpResponse};

use super::helpers::{bearer, get_auth_config, issue_expired_token, issue_token, send, Backends};
use crate::{
    auth::{AuthenticatedUser, TokenIssuer, TokenVerifier},
    config::AuthConfig,
    middleware::BearerAuth,
};

async fn call_protected(req: TestRequest, verifier: Option<TokenVerifier>) -> (StatusCode, String, usize) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let handler = move |user: AuthenticatedUser| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            HttpResponse::Ok().body(format!("{}:{}", user.user_id, user.user_name))
        }
    };
    let mut app = App::new();
    if let Some(verifier) = verifier {
        app = app.app_data(web::Data::new(verifier));
    }
    let app = app.service(web::resource("/protected").wrap(BearerAuth).route(web::get().to(handler)));
    let app = test::init_service(app).await;
    let res = test::call_service(&app, req.uri("/protected").to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body, calls.load(Ordering::SeqCst))
}

fn verifier() -> Option<TokenVerifier> {
    Some(TokenVerifier::new(&get_auth_config()))
}

#[actix_web::test]
async fn valid_token_reaches_the_handler() {
    let token = issue_token(42, "alice");
    let (status, body, calls) = call_protected(TestRequest::get().insert_header(bearer(&token)), verifier()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "42:alice");
    assert_eq!(calls, 1);
}

#[actix_web::test]
async fn missing_header_is_rejected() {
    let (status, body, calls) = call_protected(TestRequest::get(), verifier()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authorization header is required"}"#);
    assert_eq!(calls, 0);
}

#[actix_web::test]
async fn malformed_token_is_rejected() {
    for header in ["Bearer not-a-token", "Bearer ", "Token abc", "Bearerabc.def.ghi", "bearer abc.def.ghi"] {
        let req = TestRequest::get().insert_header(("Authorization", header));
        let (status, body, calls) = call_protected(req, verifier()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{header}");
        assert_eq!(body, r#"{"error":"Invalid or expired token"}"#, "{header}");
        assert_eq!(calls, 0, "{header}");
    }
}

#[actix_web::test]
async fn lowercase_scheme_is_accepted() {
    let token = issue_token(42, "alice");
    let req = TestRequest::get().insert_header(("Authorization", format!("bearer {token}")));
    let (status, body, calls) = call_protected(req, verifier()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "42:alice");
    assert_eq!(calls, 1);
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let token = issue_expired_token(42, "alice");
    let (status, body, calls) = call_protected(TestRequest::get().insert_header(bearer(&token)), verifier()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Invalid or expired token"}"#);
    assert_eq!(calls, 0);
}

#[actix_web::test]
async fn token_from_another_key_is_rejected() {
    let other = AuthConfig::new("another-secret-that-nobody-else-uses-1234", chrono::Duration::hours(24)).unwrap();
    let token = TokenIssuer::new(&other).issue_token(&super::helpers::account(42, "alice")).unwrap();
    let (status, _, calls) = call_protected(TestRequest::get().insert_header(bearer(&token)), verifier()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(calls, 0);
}

#[actix_web::test]
async fn missing_verifier_is_a_server_error() {
    let token = issue_token(42, "alice");
    let (status, _, calls) = call_protected(TestRequest::get().insert_header(bearer(&token)), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(calls, 0);
}

#[actix_web::test]
async fn every_gated_route_needs_a_token() {
    let requests = [
        TestRequest::get().uri("/users/cart"),
        TestRequest::post().uri("/users/cart").set_json(serde_json::json!({"cart_id": 1})),
        TestRequest::post().uri("/add-credit").set_json(serde_json::json!({"card_id": 1, "card_num": "4111"})),
        TestRequest::get().uri("/history"),
    ];
    for req in requests {
        // Mocks without expectations: any backend call fails the test
        let (status, _) = send(Backends::default(), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn open_routes_ignore_tokens() {
    let mut backends = Backends::default();
    backends.catalog.expect_fetch_products().times(1).returning(|| Ok(vec![]));
    let req = TestRequest::get().uri("/products").insert_header(("Authorization", "Bearer garbage"));
    let (status, body) = send(backends, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn health_is_open() {
    let (status, body) = send(Backends::default(), TestRequest::get().uri("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}
