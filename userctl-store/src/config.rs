//! Store configuration
//!
//! A single connection string decides where the store lives. It comes from
//! `DATABASE_URL`, optionally seeded from `.env` files by [`load_dotenv`].

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Environment variable holding the connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable toggling per-statement logging.
pub const ECHO_VAR: &str = "USERCTL_DB_ECHO";

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.userctl/.env
///
/// dotenvy never overwrites a variable that is already present, so loading
/// the local file first gives it precedence over the global one.
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from ~/.userctl: {}", env_file.display());
                    loaded_from.push(env_file);
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found, using process environment only");
    } else {
        info!(files = loaded_from.len(), "Loaded configuration from .env files");
    }
}

/// Get the userctl config directory path (~/.userctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".userctl"))
}

/// Relational backend selected by the connection string scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    /// Detect the backend from a connection string.
    ///
    /// In-memory SQLite URLs are refused: every pooled connection would open
    /// its own private database, so the schema created by one session is
    /// invisible to the next.
    pub fn from_url(url: &str) -> Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            if is_in_memory_sqlite(url) {
                return Err(StoreError::config(
                    "in-memory sqlite is not supported, use a file (sqlite://path/to/users.db?mode=rwc)",
                ));
            }
            Ok(Self::Sqlite)
        } else {
            let scheme = url.split(':').next().unwrap_or_default();
            Err(StoreError::config(format!(
                "unsupported database url scheme '{scheme}' (expected postgres:// or sqlite:)"
            )))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Connection settings for an [`Engine`](crate::Engine).
#[derive(Clone)]
pub struct StoreConfig {
    database_url: String,
    backend: Backend,
    /// Log every statement through `tracing` (sqlx statement logging).
    pub echo: bool,
}

// Connection strings carry credentials, keep them out of Debug output.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("backend", &self.backend)
            .field("echo", &self.echo)
            .finish_non_exhaustive()
    }
}

impl StoreConfig {
    /// Build a config for the given connection string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] when the scheme is not supported.
    pub fn new(database_url: impl Into<String>) -> Result<Self> {
        let database_url = database_url.into();
        let backend = Backend::from_url(&database_url)?;
        Ok(Self {
            database_url,
            backend,
            echo: false,
        })
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Read the configuration from the process environment.
    ///
    /// Call [`load_dotenv`] first if `.env` files should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| StoreError::config(format!("{DATABASE_URL_VAR} not set")))?;

        let echo = match lookup(ECHO_VAR) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                StoreError::config(format!("{ECHO_VAR} must be a boolean, got '{raw}'"))
            })?,
            None => false,
        };

        Ok(Self::new(url)?.with_echo(echo))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }
}

fn is_in_memory_sqlite(url: &str) -> bool {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    path.ends_with(":memory:") || query.split('&').any(|pair| pair == "mode=memory")
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
