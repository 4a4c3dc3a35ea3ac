//! JSON envelope for the AJAX endpoints.

use serde::{Deserialize, Serialize};

/// The response body every JSON endpoint answers with.
///
/// The browser scripts branch on `success` and display `text`, on both
/// outcomes, so handlers must always produce this shape — failures
/// included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub text: String,
}

impl ApiResponse {
    /// A successful envelope.
    #[must_use]
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
        }
    }

    /// A failed envelope.
    #[must_use]
    pub fn fail(text: impl Into<String>) -> Self {
        Self {
            success: false,
            text: text.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_field_names() {
        let json = serde_json::to_value(ApiResponse::ok("chore created")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["text"], "chore created");
    }

    #[test]
    fn test_fail_envelope() {
        let envelope = ApiResponse::fail("wrong password");
        assert!(!envelope.success);
        assert_eq!(envelope.text, "wrong password");
    }
}
