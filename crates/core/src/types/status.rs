//! Chore lifecycle status.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a stored status string is not recognized.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown chore status: {0}")]
pub struct ParseChoreStatusError(String);

/// Lifecycle status of a chore.
///
/// New chores start out `Pending` and are flipped to `Done` when a member
/// completes the current occurrence. Stored as lowercase TEXT in the
/// database; [`ChoreStatus::as_str`] is the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChoreStatus {
    #[default]
    Pending,
    Done,
}

impl ChoreStatus {
    /// The stored/wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ChoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChoreStatus {
    type Err = ParseChoreStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            other => Err(ParseChoreStatusError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(ChoreStatus::default(), ChoreStatus::Pending);
    }

    #[test]
    fn test_wire_roundtrip() {
        for status in [ChoreStatus::Pending, ChoreStatus::Done] {
            let parsed: ChoreStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("paused".parse::<ChoreStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_form() {
        let json = serde_json::to_string(&ChoreStatus::Done).unwrap();
        assert_eq!(json, "\"done\"");
    }
}
