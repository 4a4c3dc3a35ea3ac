//! Collective domain types.

use chrono::{DateTime, Utc};

use coclean_core::CollectiveId;

/// A named group of users sharing chores (domain type).
///
/// The collective password authorizes destructive operations on its
/// chores; it stays inside the database layer and is never part of this
/// type.
#[derive(Debug, Clone)]
pub struct Collective {
    /// Unique collective ID.
    pub id: CollectiveId,
    /// Name, unique across the site.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// School the collective is attached to.
    pub school: String,
    /// When the collective was created.
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a collective.
#[derive(Debug, Clone)]
pub struct NewCollective {
    pub name: String,
    pub description: String,
    pub school: String,
    pub password: String,
}
