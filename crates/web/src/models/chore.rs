//! Chore domain types.

use chrono::{DateTime, NaiveDate, Utc};

use coclean_core::{ChoreId, ChoreStatus, CollectiveId};

/// A recurring task bound to a collective (domain type).
#[derive(Debug, Clone)]
pub struct Chore {
    /// Unique chore ID.
    pub id: ChoreId,
    /// Collective this chore belongs to.
    pub collective_id: CollectiveId,
    /// Title, unique within the collective.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Current lifecycle status.
    pub status: ChoreStatus,
    /// First day the chore is due.
    pub start_date: NaiveDate,
    /// Days between occurrences.
    pub frequency_days: i32,
    /// When the chore was created.
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a chore via the `new_chore` routine.
///
/// The collective is addressed by name, matching the routine's contract.
#[derive(Debug, Clone)]
pub struct NewChore {
    pub collective: String,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub frequency_days: i32,
}

/// Fields for editing a chore via the `edit_chore` routine, keyed by
/// collective name + title.
#[derive(Debug, Clone)]
pub struct ChoreChanges {
    pub collective: String,
    pub title: String,
    pub description: String,
    pub frequency_days: i32,
}
