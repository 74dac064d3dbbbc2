//! Command implementations for userctl

pub mod schema;
pub mod users;

pub use schema::{run_init_schema, InitSchemaArgs};
pub use users::{run_add, run_get, AddArgs, GetArgs};
