//! Database migration command.
//!
//! Applies the web crate's sqlx migrations (tables + routines) to the
//! database named by the `DB_*` environment variables.

use tracing::info;

use coclean_web::config::CoCleanConfig;
use coclean_web::db;

use super::CommandError;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let config = CoCleanConfig::from_env()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&config.database).await?;

    info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    info!("Migrations complete");
    Ok(())
}
