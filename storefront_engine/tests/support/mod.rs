#![allow(dead_code)]

use storefront_engine::{
    db_types::{Account, NewAccount},
    test_utils::prepare_env::TestStore,
    AuthApi,
    SqliteDatabase,
};

pub const TEST_HASH_COST: u32 = 4;

/// Keep the returned store alive for the whole test. Its database file is deleted when it goes out of scope.
pub async fn setup() -> TestStore {
    TestStore::new().await
}

pub fn auth_api(db: &SqliteDatabase) -> AuthApi<SqliteDatabase> {
    AuthApi::new(db.clone()).with_hash_cost(TEST_HASH_COST)
}

pub async fn register(db: &SqliteDatabase, name: &str, email: &str) -> Account {
    let account = NewAccount::new(name, "secret1", email, "555", "1 Main St");
    auth_api(db).register(account).await.expect("Error registering account")
}
