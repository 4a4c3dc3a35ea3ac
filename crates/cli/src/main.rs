//! CoClean CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! coclean-cli migrate
//!
//! # Seed a demo collective with a user and chores
//! coclean-cli seed
//! ```
//!
//! Both commands read the same `DB_*` environment variables as the web
//! application.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "coclean-cli")]
#[command(author, version, about = "CoClean CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with demo data
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), commands::CommandError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coclean_cli=info,coclean_web=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
    }
}
