//! Collective repository for database operations.
//!
//! Collectives have no server-side routines; these are plain
//! parameterized statements. The stored password authorizes chore
//! deletion (checked inside `delete_chore`) and never leaves this layer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use coclean_core::CollectiveId;

use super::RepositoryError;
use crate::models::{Collective, NewCollective};

/// Internal row type for `PostgreSQL` collective queries.
#[derive(Debug, sqlx::FromRow)]
struct CollectiveRow {
    id: i32,
    name: String,
    description: String,
    school: String,
    created_at: DateTime<Utc>,
}

impl From<CollectiveRow> for Collective {
    fn from(row: CollectiveRow) -> Self {
        Self {
            id: CollectiveId::new(row.id),
            name: row.name,
            description: row.description,
            school: row.school,
            created_at: row.created_at,
        }
    }
}

const SELECT_COLLECTIVE: &str = "SELECT id, name, description, school, created_at FROM collective";

/// Repository for collective database operations.
pub struct CollectiveRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CollectiveRepository<'a> {
    /// Create a new collective repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a collective by its name.
    ///
    /// A missing collective is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Collective>, RepositoryError> {
        let row = sqlx::query_as::<_, CollectiveRow>(&format!("{SELECT_COLLECTIVE} WHERE name = $1"))
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List all collectives.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Collective>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, CollectiveRow>(&format!("{SELECT_COLLECTIVE} ORDER BY name ASC"))
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a new collective.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, collective: &NewCollective) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO collective (name, description, school, password) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&collective.name)
        .bind(&collective.description)
        .bind(&collective.school)
        .bind(&collective.password)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("collective name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Update a collective's description and school, keyed by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no collective has this name.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        name: &str,
        description: &str,
        school: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE collective SET description = $1, school = $2 WHERE name = $3",
        )
        .bind(description)
        .bind(school)
        .bind(name)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a collective by name.
    ///
    /// Its chores go with it (`ON DELETE CASCADE`).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no collective has this name.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM collective WHERE name = $1")
            .bind(name)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
