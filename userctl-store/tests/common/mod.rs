//! Shared fixtures for store integration tests

#![allow(dead_code)]

use tempfile::TempDir;
use userctl_store::{Engine, StoreConfig};

/// Engine over a fresh SQLite file with the schema already created.
///
/// Keep the returned `TempDir` alive for as long as the engine is used.
pub async fn sqlite_engine() -> (TempDir, Engine) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("users.db").display());
    let config = StoreConfig::new(url).expect("sqlite url");

    let engine = Engine::connect(&config).await.expect("connect");
    engine.initialize_schema().await.expect("initialize schema");
    (dir, engine)
}

/// Engine over the PostgreSQL database in `DATABASE_URL`, schema recreated.
pub async fn postgres_engine() -> Engine {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let config = StoreConfig::new(url).expect("postgres url");

    let engine = Engine::connect(&config).await.expect("connect");
    engine.initialize_schema().await.expect("initialize schema");
    engine
}

/// Number of rows stored for `username`.
pub async fn count_rows(engine: &Engine, username: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM "user" WHERE username = $1"#)
        .bind(username)
        .fetch_one(engine.pool())
        .await
        .expect("count query")
}
