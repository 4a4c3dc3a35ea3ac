//! Database operations for CoClean `PostgreSQL`.
//!
//! ## Tables
//!
//! - `collective` - Named groups of users sharing chores
//! - `app_user` - Site authentication and profile data
//! - `chore` - Recurring tasks bound to a collective
//! - tower-sessions stores its own session table (created at startup)
//!
//! ## Routines
//!
//! Mutations on users and chores go through server-side routines
//! (`new_user`, `edit_user`, `delete_user`, `new_chore`, `edit_chore`,
//! `delete_chore`) that return an integer result code; see
//! [`check_routine_code`] for the mapping. Every routine argument is a
//! bound parameter.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p coclean-cli -- migrate
//! ```

pub mod chores;
pub mod collectives;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

pub use chores::ChoreRepository;
pub use collectives::CollectiveRepository;
pub use users::UserRepository;

use crate::config::DatabaseCredentials;

/// Upper bound for any single statement, enforced server-side. A hung
/// query fails the request instead of hanging it.
const STATEMENT_TIMEOUT_MS: u64 = 5_000;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate email or title).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The supplied password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A routine returned a result code outside the documented set.
    #[error("routine returned unknown result code {0}")]
    UnknownRoutineCode(i32),
}

/// Map a routine result code to a repository outcome.
///
/// The routines signal their outcome through an integer return value:
///
/// | code | meaning              | mapped to              |
/// |------|----------------------|------------------------|
/// | 0    | success              | `Ok(())`               |
/// | 1    | target not found     | `NotFound`             |
/// | 2    | credential mismatch  | `InvalidCredentials`   |
/// | 3    | duplicate            | `Conflict`             |
///
/// # Errors
///
/// Returns the mapped `RepositoryError` for any non-zero code.
pub fn check_routine_code(code: i32, conflict_text: &str) -> Result<(), RepositoryError> {
    match code {
        0 => Ok(()),
        1 => Err(RepositoryError::NotFound),
        2 => Err(RepositoryError::InvalidCredentials),
        3 => Err(RepositoryError::Conflict(conflict_text.to_owned())),
        other => Err(RepositoryError::UnknownRoutineCode(other)),
    }
}

/// Create a `PostgreSQL` connection pool from the credentials holder.
///
/// The pool uses sensible defaults plus an acquire timeout, and every
/// connection carries a server-side statement timeout.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(credentials: &DatabaseCredentials) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::new()
        .host(&credentials.host)
        .port(credentials.port)
        .username(&credentials.user)
        .password(credentials.password.expose_secret())
        .database(&credentials.database)
        .options([("statement_timeout", &STATEMENT_TIMEOUT_MS.to_string())]);

    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routine_code_success() {
        assert!(check_routine_code(0, "dup").is_ok());
    }

    #[test]
    fn test_routine_code_not_found() {
        assert!(matches!(
            check_routine_code(1, "dup"),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn test_routine_code_invalid_credentials() {
        assert!(matches!(
            check_routine_code(2, "dup"),
            Err(RepositoryError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_routine_code_conflict_carries_text() {
        match check_routine_code(3, "email already exists") {
            Err(RepositoryError::Conflict(text)) => {
                assert_eq!(text, "email already exists");
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_routine_code_unknown() {
        assert!(matches!(
            check_routine_code(42, "dup"),
            Err(RepositoryError::UnknownRoutineCode(42))
        ));
    }
}
