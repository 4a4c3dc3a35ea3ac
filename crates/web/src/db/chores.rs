//! Chore repository for database operations.
//!
//! Reads are parameterized selects; create/edit/delete go through the
//! `new_chore` / `edit_chore` / `delete_chore` routines. The delete
//! routine authorizes against the owning collective's password and leaves
//! the row in place on a mismatch.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use coclean_core::{ChoreId, ChoreStatus, CollectiveId};

use super::{RepositoryError, check_routine_code};
use crate::models::{Chore, ChoreChanges, NewChore};

/// Internal row type for `PostgreSQL` chore queries.
#[derive(Debug, sqlx::FromRow)]
struct ChoreRow {
    id: i32,
    collective_id: i32,
    title: String,
    description: String,
    status: String,
    start_date: chrono::NaiveDate,
    frequency_days: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<ChoreRow> for Chore {
    type Error = RepositoryError;

    fn try_from(row: ChoreRow) -> Result<Self, Self::Error> {
        let status: ChoreStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid chore status in database: {e}"))
        })?;

        Ok(Self {
            id: ChoreId::new(row.id),
            collective_id: CollectiveId::new(row.collective_id),
            title: row.title,
            description: row.description,
            status,
            start_date: row.start_date,
            frequency_days: row.frequency_days,
            created_at: row.created_at,
        })
    }
}

const SELECT_CHORE: &str = "SELECT id, collective_id, title, description, status, \
                            start_date, frequency_days, created_at FROM chore";

/// Repository for chore database operations.
pub struct ChoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChoreRepository<'a> {
    /// Create a new chore repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all chores.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored status is invalid.
    pub async fn list_all(&self) -> Result<Vec<Chore>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, ChoreRow>(&format!("{SELECT_CHORE} ORDER BY start_date ASC"))
                .fetch_all(self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a chore by its ID.
    ///
    /// A missing chore is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored status is invalid.
    pub async fn get_by_id(&self, id: ChoreId) -> Result<Option<Chore>, RepositoryError> {
        let row = sqlx::query_as::<_, ChoreRow>(&format!("{SELECT_CHORE} WHERE id = $1"))
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        if row.is_none() {
            debug!(chore_id = %id, "no chore with this id");
        }

        row.map(TryInto::try_into).transpose()
    }

    /// List the chores of one collective, addressed by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored status is invalid.
    pub async fn list_for_collective(
        &self,
        collective: &str,
    ) -> Result<Vec<Chore>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChoreRow>(
            "SELECT c.id, c.collective_id, c.title, c.description, c.status, \
                    c.start_date, c.frequency_days, c.created_at \
             FROM chore c \
             JOIN collective k ON k.id = c.collective_id \
             WHERE k.name = $1 \
             ORDER BY c.start_date ASC",
        )
        .bind(collective)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a chore via the `new_chore` routine.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the collective does not exist.
    /// Returns `RepositoryError::Conflict` if the collective already has a
    /// chore with this title.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, chore: &NewChore) -> Result<(), RepositoryError> {
        let code = sqlx::query_scalar::<_, i32>("SELECT new_chore($1, $2, $3, $4, $5)")
            .bind(&chore.collective)
            .bind(&chore.title)
            .bind(&chore.description)
            .bind(chore.start_date)
            .bind(chore.frequency_days)
            .fetch_one(self.pool)
            .await?;

        check_routine_code(code, "chore title already exists in this collective")
    }

    /// Update a chore via the `edit_chore` routine, keyed by collective
    /// name + title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the collective or chore does
    /// not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, changes: &ChoreChanges) -> Result<(), RepositoryError> {
        let code = sqlx::query_scalar::<_, i32>("SELECT edit_chore($1, $2, $3, $4)")
            .bind(&changes.collective)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.frequency_days)
            .fetch_one(self.pool)
            .await?;

        check_routine_code(code, "chore title already exists in this collective")
    }

    /// Delete a chore via the `delete_chore` routine.
    ///
    /// The routine checks the collective's password before deleting; a
    /// mismatch leaves the chore untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the collective or chore does
    /// not exist.
    /// Returns `RepositoryError::InvalidCredentials` if the password does
    /// not match.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(
        &self,
        collective: &str,
        title: &str,
        password: &str,
    ) -> Result<(), RepositoryError> {
        let code = sqlx::query_scalar::<_, i32>("SELECT delete_chore($1, $2, $3)")
            .bind(collective)
            .bind(title)
            .bind(password)
            .fetch_one(self.pool)
            .await?;

        check_routine_code(code, "chore title already exists in this collective")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_row(status: &str) -> ChoreRow {
        ChoreRow {
            id: 5,
            collective_id: 2,
            title: "Dishes".to_string(),
            description: "Every evening after dinner".to_string(),
            status: status.to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            frequency_days: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_chore_row_conversion() {
        let chore = Chore::try_from(sample_row("pending")).unwrap();
        assert_eq!(chore.id.as_i32(), 5);
        assert_eq!(chore.collective_id.as_i32(), 2);
        assert_eq!(chore.status, ChoreStatus::Pending);
        assert_eq!(chore.frequency_days, 1);
    }

    #[test]
    fn test_chore_row_unknown_status_is_corruption() {
        assert!(matches!(
            Chore::try_from(sample_row("snoozed")),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
