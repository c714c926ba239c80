use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use chrono::{Duration, Utc};
use storefront_engine::{db_types::Account, AuthApi, CatalogApi, ShoppingApi};

use super::mocks::MockStore;
use crate::{
    auth::{TokenIssuer, TokenVerifier},
    config::AuthConfig,
    server::{configure_routes, json_config, path_config},
};

// DO NOT re-use this secret anywhere.
pub const TEST_SECRET: &str = "endpoint-tests-secret-0123456789abcdef";
pub const TEST_HASH_COST: u32 = 4;

pub fn get_auth_config() -> AuthConfig {
    AuthConfig::new(TEST_SECRET, Duration::hours(24)).unwrap()
}

pub fn account(user_id: i64, user_name: &str) -> Account {
    Account {
        user_id,
        user_name: user_name.to_string(),
        email: format!("{user_name}@x.com"),
        phone: "555".to_string(),
        address: "1 Main St".to_string(),
        created_at: Utc::now(),
    }
}

pub fn issue_token(user_id: i64, user_name: &str) -> String {
    TokenIssuer::new(&get_auth_config()).issue_token(&account(user_id, user_name)).unwrap()
}

pub fn issue_expired_token(user_id: i64, user_name: &str) -> String {
    let issued_at = Utc::now() - Duration::hours(25);
    TokenIssuer::new(&get_auth_config()).issue_token_at(&account(user_id, user_name), issued_at).unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// One mock per API, so that each test only sets up expectations for the backend it exercises. A call on a mock
/// without a matching expectation fails the test.
#[derive(Default)]
pub struct Backends {
    pub auth: MockStore,
    pub catalog: MockStore,
    pub shopping: MockStore,
}

pub async fn send(backends: Backends, req: TestRequest) -> (StatusCode, String) {
    let _ = env_logger::try_init();
    let config = get_auth_config();
    let app = App::new()
        .app_data(json_config())
        .app_data(path_config())
        .app_data(web::Data::new(AuthApi::new(backends.auth).with_hash_cost(TEST_HASH_COST)))
        .app_data(web::Data::new(CatalogApi::new(backends.catalog)))
        .app_data(web::Data::new(ShoppingApi::new(backends.shopping)))
        .app_data(web::Data::new(TokenIssuer::new(&config)))
        .app_data(web::Data::new(TokenVerifier::new(&config)))
        .configure(configure_routes::<MockStore>);
    let app = test::init_service(app).await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}
