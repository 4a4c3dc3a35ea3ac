//! User domain types.

use chrono::{DateTime, Utc};

use coclean_core::{Email, UserId};

/// A CoClean user (domain type).
///
/// The stored password never appears here; the repository hands it out
/// only through the dedicated login lookup.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Email address, the user's lookup key.
    pub email: Email,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a user via the `new_user` routine.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub email: Email,
    /// Stored by the routine as-is; comparison also happens server-side.
    pub password: String,
}

/// Fields for editing a user via the `edit_user` routine, keyed by email.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub surname: String,
    pub email: Email,
    pub password: String,
}
