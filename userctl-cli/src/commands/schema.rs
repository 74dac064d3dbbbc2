//! init-schema: destructive bootstrap of the user table

use anyhow::{bail, Context, Result};
use clap::Parser;
use userctl_store::Engine;

/// Arguments for the init-schema command
#[derive(Parser, Debug)]
pub struct InitSchemaArgs {
    /// Confirm that every stored user may be deleted
    #[arg(long)]
    pub yes: bool,
}

/// Drop and recreate the schema
pub async fn run_init_schema(engine: &Engine, args: InitSchemaArgs) -> Result<()> {
    if !args.yes {
        bail!("init-schema drops the user table and all its rows; re-run with --yes to confirm");
    }

    engine
        .initialize_schema()
        .await
        .context("Failed to initialize schema")?;

    println!("Schema initialized ({})", engine.backend().as_str());
    Ok(())
}
