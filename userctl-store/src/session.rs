//! Sessions: one pooled connection held for one unit of work
//!
//! A session is released when it is dropped, so the connection goes back to
//! the pool on success, on error, and when the owning future is cancelled.

use std::time::Instant;

use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyConnection, Connection, Transaction};
use uuid::Uuid;

use crate::config::Backend;

/// Exclusive handle to the store for one logical operation sequence.
///
/// Not `Clone`; operations borrow it mutably, so two operations can never
/// run on the same session at once.
pub struct Session {
    id: Uuid,
    backend: Backend,
    conn: PoolConnection<Any>,
    opened_at: Instant,
}

impl Session {
    pub(crate) fn new(conn: PoolConnection<Any>, backend: Backend) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            backend,
            conn,
            opened_at: Instant::now(),
        };
        tracing::debug!(session = %session.id, backend = backend.as_str(), "session opened");
        session
    }

    /// Identifier used to correlate log lines from one session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Release the session back to the engine.
    ///
    /// Equivalent to dropping it; spelled out for call sites that want the
    /// release point visible.
    pub fn close(self) {
        drop(self);
    }

    pub(crate) fn connection(&mut self) -> &mut AnyConnection {
        &mut self.conn
    }

    /// Start a transaction on this session's connection. Dropping the
    /// returned transaction without committing rolls it back.
    pub(crate) async fn begin(&mut self) -> Result<Transaction<'_, Any>, sqlx::Error> {
        Connection::begin(&mut *self.conn).await
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::debug!(
            session = %self.id,
            held = ?self.opened_at.elapsed(),
            "session released"
        );
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
