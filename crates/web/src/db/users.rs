//! User repository for database operations.
//!
//! Reads are plain parameterized selects; writes go through the
//! `new_user` / `edit_user` / `delete_user` routines and their result
//! codes. Queries use the runtime-checked sqlx API with every value bound.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use coclean_core::{Email, UserId};

use super::{RepositoryError, check_routine_code};
use crate::models::{NewUser, User, UserChanges};

/// Internal row type for `PostgreSQL` user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    surname: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            name: row.name,
            surname: row.surname,
            email,
            created_at: row.created_at,
        })
    }
}

const SELECT_USER: &str = "SELECT id, name, surname, email, created_at FROM app_user";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// A missing user is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        if row.is_none() {
            debug!(email = %email, "no user with this email");
        }

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user together with their stored password, for the login flow.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_with_password(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, (i32, String, String, String, DateTime<Utc>, String)>(
            "SELECT id, name, surname, email, created_at, password \
             FROM app_user WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some((id, name, surname, email, created_at, password)) = row else {
            return Ok(None);
        };

        let user = User::try_from(UserRow {
            id,
            name,
            surname,
            email,
            created_at,
        })?;

        Ok(Some((user, password)))
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored email is invalid.
    pub async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} ORDER BY created_at ASC"))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a new user via the `new_user` routine.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user: &NewUser) -> Result<(), RepositoryError> {
        let code = sqlx::query_scalar::<_, i32>("SELECT new_user($1, $2, $3, $4)")
            .bind(&user.name)
            .bind(&user.surname)
            .bind(user.email.as_str())
            .bind(&user.password)
            .fetch_one(self.pool)
            .await?;

        check_routine_code(code, "email already exists")
    }

    /// Update a user via the `edit_user` routine, keyed by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this email.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, changes: &UserChanges) -> Result<(), RepositoryError> {
        let code = sqlx::query_scalar::<_, i32>("SELECT edit_user($1, $2, $3, $4)")
            .bind(&changes.name)
            .bind(&changes.surname)
            .bind(changes.email.as_str())
            .bind(&changes.password)
            .fetch_one(self.pool)
            .await?;

        check_routine_code(code, "email already exists")
    }

    /// Delete a user via the `delete_user` routine.
    ///
    /// The routine checks the password before deleting; a mismatch leaves
    /// the row untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this email.
    /// Returns `RepositoryError::InvalidCredentials` if the password does not match.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, email: &Email, password: &str) -> Result<(), RepositoryError> {
        let code = sqlx::query_scalar::<_, i32>("SELECT delete_user($1, $2)")
            .bind(email.as_str())
            .bind(password)
            .fetch_one(self.pool)
            .await?;

        check_routine_code(code, "email already exists")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_row_conversion() {
        let row = UserRow {
            id: 1,
            name: "Ola".to_string(),
            surname: "Nordmann".to_string(),
            email: "ola@example.com".to_string(),
            created_at: Utc::now(),
        };

        let user = User::try_from(row).unwrap();
        assert_eq!(user.id.as_i32(), 1);
        assert_eq!(user.email.as_str(), "ola@example.com");
    }

    #[test]
    fn test_user_row_invalid_email_is_corruption() {
        let row = UserRow {
            id: 2,
            name: "Kari".to_string(),
            surname: "Nordmann".to_string(),
            email: "not-an-email".to_string(),
            created_at: Utc::now(),
        };

        assert!(matches!(
            User::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
