//! User payloads handed across the store boundary
//!
//! `NewUser` is what callers insert, `UserDto` is what they get back. The
//! storage row lives in [`crate::schema`] and never leaves this crate.

use serde::{Deserialize, Serialize};

use crate::schema::UserRow;

/// Upper bound on `name`, in characters. Enforced by the store.
pub const NAME_MAX_CHARS: usize = 40;

/// Fields for a user about to be inserted.
///
/// There is no `id` here: the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A fetched user as exposed to callers outside the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
}

impl From<UserRow> for UserDto {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            name: row.name,
        }
    }
}
