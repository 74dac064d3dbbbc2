//! User repository
//!
//! Both operations run on a caller-owned session:
//! - add: INSERT + COMMIT in one call, store constraints surface as errors
//! - get: exact match on username, first row or nothing

use tracing::instrument;

use crate::error::Result;
use crate::models::{NewUser, UserDto};
use crate::schema::{UserRow, INSERT_USER, SELECT_USER_BY_USERNAME};
use crate::session::Session;

/// User repository bound to one session.
pub struct UserRepo<'s> {
    session: &'s mut Session,
}

impl<'s> UserRepo<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Self { session }
    }

    /// Insert a user and commit.
    ///
    /// The store assigns the id. A duplicate `username` comes back as a
    /// unique-constraint [`StoreError::ConstraintViolation`](crate::StoreError),
    /// an oversize `name` as a check-constraint one. Either way the
    /// transaction is rolled back and no row is written.
    #[instrument(skip_all, fields(session = %self.session.id(), username = %user.username))]
    pub async fn add(&mut self, user: NewUser) -> Result<()> {
        let mut tx = self.session.begin().await?;

        sqlx::query(INSERT_USER)
            .bind(user.username.as_str())
            .bind(user.name.as_deref())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!("user added");
        Ok(())
    }

    /// Look up a user by username.
    ///
    /// `Ok(None)` when nobody has that username; absence is not an error.
    #[instrument(skip(self), fields(session = %self.session.id()))]
    pub async fn get(&mut self, username: &str) -> Result<Option<UserDto>> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_USER_BY_USERNAME)
            .bind(username)
            .fetch_optional(self.session.connection())
            .await?;

        tracing::debug!(found = row.is_some(), "user lookup");
        Ok(row.map(UserDto::from))
    }
}
