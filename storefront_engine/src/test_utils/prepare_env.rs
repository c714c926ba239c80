use std::{
    env,
    fs,
    io,
    ops::Deref,
    path::{Path, PathBuf},
};

use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::SqliteDatabase;

pub async fn prepare_test_env(url: &str) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    create_database(url).await;
    run_migrations(url).await;
}

/// A fresh database file in the system temp directory, so that tests can run in parallel without sharing state.
pub fn random_db_file() -> PathBuf {
    env::temp_dir().join(format!("sfs_test_store_{}.db", rand::random::<u64>()))
}

pub fn db_url(path: &Path) -> String {
    format!("sqlite://{}", path.display())
}

pub async fn run_migrations(url: &str) {
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    info!("🚀️ Migrations complete");
}

pub async fn create_database(url: &str) {
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("Error dropping database {url}: {e:?}");
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("Created Sqlite database {url}");
}

/// A migrated database in its own temp file. The file is deleted when this is dropped, even if the test panicked.
pub struct TestStore {
    db: SqliteDatabase,
    path: PathBuf,
}

impl TestStore {
    pub async fn new() -> Self {
        let path = random_db_file();
        let url = db_url(&path);
        prepare_test_env(&url).await;
        let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database");
        Self { db, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Deref for TestStore {
    type Target = SqliteDatabase;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

impl Drop for TestStore {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            match fs::remove_file(&file) {
                Ok(()) => trace!("🚀️ Removed {}", file.to_string_lossy()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {},
                Err(e) => warn!("🚀️ Could not remove test database {}: {e}", file.to_string_lossy()),
            }
        }
    }
}
