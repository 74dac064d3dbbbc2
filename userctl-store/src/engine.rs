//! Engine: the pooled connection manager sessions are drawn from
//!
//! Build one with [`Engine::connect`] at startup and pass it to whatever needs
//! sessions. For binaries that prefer a process-wide instance,
//! [`Engine::init_global`] / [`Engine::global`] hold one for the life of the
//! process; it is never torn down before exit.

use std::str::FromStr;

use futures::future::BoxFuture;
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::{AnyPool, ConnectOptions};
use tokio::sync::OnceCell;

use crate::config::{Backend, StoreConfig};
use crate::error::{Result, StoreError};
use crate::schema;
use crate::session::Session;

static GLOBAL_ENGINE: OnceCell<Engine> = OnceCell::const_new();

/// Pooled connection manager for one store.
///
/// Cheap to clone; clones share the same pool.
#[derive(Clone, Debug)]
pub struct Engine {
    pool: AnyPool,
    backend: Backend,
}

impl Engine {
    /// Connect to the store described by `config`.
    ///
    /// Pool sizing is left to the driver defaults. The pool opens physical
    /// connections on demand and multiplexes them across sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or the first connection
    /// fails.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let mut options = AnyConnectOptions::from_str(config.database_url())
            .map_err(|e| StoreError::config(format!("invalid database url: {e}")))?;
        if !config.echo {
            options = options.disable_statement_logging();
        }

        let pool = AnyPoolOptions::new().connect_with(options).await?;
        tracing::info!(backend = config.backend().as_str(), "Connected to store");

        Ok(Self {
            pool,
            backend: config.backend(),
        })
    }

    /// Install the process-wide engine.
    ///
    /// Only the first call connects; later calls return the engine that is
    /// already installed and ignore `config`.
    pub async fn init_global(config: &StoreConfig) -> Result<&'static Engine> {
        GLOBAL_ENGINE.get_or_try_init(|| Self::connect(config)).await
    }

    /// The process-wide engine, connecting on first use with configuration
    /// read from the environment.
    pub async fn global() -> Result<&'static Engine> {
        GLOBAL_ENGINE
            .get_or_try_init(|| async {
                let config = StoreConfig::from_env()?;
                Self::connect(&config).await
            })
            .await
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Underlying pool, for callers that need raw access (tests, diagnostics).
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Drop and recreate the schema.
    ///
    /// Destructive: every stored user is lost. Meant for tests and first-time
    /// bootstrap only; production databases need a migration tool instead.
    /// Must run before any `add`/`get` against a fresh store.
    pub async fn initialize_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        schema::recreate(&mut tx, self.backend).await?;
        tx.commit().await?;

        tracing::info!(backend = self.backend.as_str(), "Schema initialized");
        Ok(())
    }

    /// Check out a session for one unit of work.
    ///
    /// The caller owns the session exclusively until it is closed or dropped.
    ///
    /// # Errors
    ///
    /// [`StoreError::Connectivity`] when no connection can be obtained.
    pub async fn acquire_session(&self) -> Result<Session> {
        let conn = self.pool.acquire().await?;
        Ok(Session::new(conn, self.backend))
    }

    /// Run `f` with a fresh session and release it afterwards, whatever `f`
    /// returned.
    ///
    /// ```ignore
    /// let user = engine
    ///     .with_session(|session| Box::pin(async move { UserRepo::new(session).get("ada").await }))
    ///     .await?;
    /// ```
    pub async fn with_session<T, F>(&self, f: F) -> Result<T>
    where
        F: for<'s> FnOnce(&'s mut Session) -> BoxFuture<'s, Result<T>>,
    {
        let mut session = self.acquire_session().await?;
        let outcome = f(&mut session).await;
        session.close();
        outcome
    }

    /// Close the pool, waiting for checked-out connections to come back.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!(backend = self.backend.as_str(), "Engine closed");
    }
}
