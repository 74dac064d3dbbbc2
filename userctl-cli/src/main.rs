//! userctl - command-line caller for the user store
//!
//! Bootstraps the schema and runs the two store operations:
//! - `init-schema --yes`: drop and recreate the user table
//! - `add <USERNAME> [--name NAME]`: insert a user
//! - `get <USERNAME> [--json]`: look a user up (exit status 1 when absent)

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use userctl_store::{Engine, StoreConfig};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "userctl",
    author,
    version,
    about = "Add and look up users in a PostgreSQL or SQLite store"
)]
struct Cli {
    /// Store connection string (postgres://... or sqlite://...)
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Log every SQL statement
    #[arg(long, global = true, env = "USERCTL_DB_ECHO")]
    echo: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drop and recreate the user table (destroys all users)
    InitSchema(commands::InitSchemaArgs),
    /// Add a user
    Add(commands::AddArgs),
    /// Look up a user by username
    Get(commands::GetArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    userctl_store::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let database_url = cli.database_url.context(
        "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.userctl/.env",
    )?;
    let config = StoreConfig::new(database_url)?.with_echo(cli.echo);
    let engine = Engine::connect(&config)
        .await
        .context("Failed to connect to store")?;

    let status = match cli.command {
        Commands::InitSchema(args) => {
            commands::run_init_schema(&engine, args).await?;
            ExitCode::SUCCESS
        }
        Commands::Add(args) => {
            commands::run_add(&engine, args).await?;
            ExitCode::SUCCESS
        }
        Commands::Get(args) => commands::run_get(&engine, args).await?,
    };

    engine.close().await;
    Ok(status)
}
