//! CLI command implementations.

pub mod migrate;
pub mod seed;

use coclean_web::config::ConfigError;
use coclean_web::db::RepositoryError;

/// Errors a CLI command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
