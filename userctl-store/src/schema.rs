//! Storage mapping for the `user` table
//!
//! Column layout is shared by both backends; only the identity column differs.

use sqlx::{AnyConnection, FromRow};

use crate::config::Backend;
use crate::error::Result;

/// Table name. Quoted in SQL because `user` is reserved in PostgreSQL.
pub const USER_TABLE: &str = "user";

/// Storage row, one per user.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
}

pub(crate) const INSERT_USER: &str = r#"INSERT INTO "user" (username, name) VALUES ($1, $2)"#;

pub(crate) const SELECT_USER_BY_USERNAME: &str = r#"
    SELECT id, username, name
    FROM "user"
    WHERE username = $1
    ORDER BY id
    LIMIT 1
"#;

const DROP_USER_TABLE: &str = r#"DROP TABLE IF EXISTS "user""#;

const CREATE_USER_TABLE_POSTGRES: &str = r#"
    CREATE TABLE "user" (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        name TEXT,
        CONSTRAINT user_username_not_empty CHECK (length(username) > 0),
        CONSTRAINT user_name_length CHECK (length(name) <= 40)
    )
"#;

const CREATE_USER_TABLE_SQLITE: &str = r#"
    CREATE TABLE "user" (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        name TEXT,
        CONSTRAINT user_username_not_empty CHECK (length(username) > 0),
        CONSTRAINT user_name_length CHECK (length(name) <= 40)
    )
"#;

/// DDL statements that rebuild the schema from scratch, in execution order.
pub fn recreate_statements(backend: Backend) -> [&'static str; 2] {
    let create = match backend {
        Backend::Postgres => CREATE_USER_TABLE_POSTGRES,
        Backend::Sqlite => CREATE_USER_TABLE_SQLITE,
    };
    [DROP_USER_TABLE, create]
}

/// Drop and recreate every table. Destroys all stored users.
pub(crate) async fn recreate(conn: &mut AnyConnection, backend: Backend) -> Result<()> {
    tracing::warn!(backend = backend.as_str(), table = USER_TABLE, "Dropping and recreating schema");

    for statement in recreate_statements(backend) {
        sqlx::query(statement).execute(&mut *conn).await?;
    }

    Ok(())
}
