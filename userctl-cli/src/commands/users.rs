//! add / get commands
//!
//! Each invocation is one unit of work: acquire a session, run the
//! operation, release the session.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use userctl_store::{Engine, NewUser, UserRepo};

/// Arguments for the add command
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Unique username
    pub username: String,

    /// Display name (up to 40 characters)
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

/// Arguments for the get command
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Username to look up
    pub username: String,

    /// Print the user as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_add(engine: &Engine, args: AddArgs) -> Result<()> {
    let mut user = NewUser::new(args.username);
    user.name = args.name;
    let username = user.username.clone();

    engine
        .with_session(|session| Box::pin(async move { UserRepo::new(session).add(user).await }))
        .await
        .with_context(|| format!("Failed to add user '{username}'"))?;

    println!("Added user '{username}'");
    Ok(())
}

/// Look a user up. Absence is reported through the exit code, not an error.
pub async fn run_get(engine: &Engine, args: GetArgs) -> Result<ExitCode> {
    let username = args.username;
    let lookup = username.clone();
    let found = engine
        .with_session(move |session| {
            Box::pin(async move { UserRepo::new(session).get(&lookup).await })
        })
        .await
        .with_context(|| format!("Failed to look up user '{username}'"))?;

    let Some(user) = found else {
        eprintln!("User '{username}' not found");
        return Ok(ExitCode::FAILURE);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!("id:       {}", user.id);
        println!("username: {}", user.username);
        println!("name:     {}", user.name.as_deref().unwrap_or("-"));
    }

    Ok(ExitCode::SUCCESS)
}
