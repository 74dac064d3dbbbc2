//! userctl-store: async data access for the `user` table
//!
//! Callers hold an [`Engine`] (the pooled connection manager), acquire a
//! [`Session`] per unit of work and hand it to [`UserRepo`] for the two
//! operations the store supports: `add` and `get`.
//!
//! ```ignore
//! let engine = Engine::connect(&StoreConfig::from_env()?).await?;
//! engine.initialize_schema().await?;
//!
//! let mut session = engine.acquire_session().await?;
//! UserRepo::new(&mut session).add(NewUser::new("ada").with_name("Ada Lovelace")).await?;
//! let user = UserRepo::new(&mut session).get("ada").await?;
//! session.close();
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod repo;
pub mod schema;
pub mod session;

pub use config::{load_dotenv, Backend, StoreConfig};
pub use engine::Engine;
pub use error::{ConstraintKind, Result, StoreError};
pub use models::{NewUser, UserDto, NAME_MAX_CHARS};
pub use repo::UserRepo;
pub use session::Session;
