//! HTTP route handlers for CoClean.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Signup & Auth
//! GET  /signup                 - Signup page
//! POST /signup                 - Create account
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//!
//! # Profile (requires auth)
//! GET  /profile                - Profile page
//! POST /profile/edit           - Update name/surname/password
//! POST /profile/delete         - Delete account (password confirmed)
//!
//! # Collective
//! GET    /collective           - Collective page (selected one, or the list)
//! POST   /collective           - Create a collective
//! POST   /collective/open      - Select a collective for this session
//! PUT    /collective/edit      - Update (JSON, envelope response)
//! DELETE /collective/delete    - Delete the selected one (JSON envelope)
//!
//! # Chore (JSON endpoints used by the page scripts)
//! GET    /chore                - Chore list page
//! POST   /chore/create         - Create (JSON, envelope response)
//! PUT    /chore/edit           - Update (JSON, envelope response)
//! DELETE /chore/delete         - Delete (JSON, envelope response)
//! ```
//!
//! Every JSON endpoint answers `{success, text}` on success and failure
//! alike; the page scripts read `result.success` unconditionally.

pub mod auth;
pub mod chore;
pub mod collective;
pub mod home;
pub mod profile;
pub mod signup;

use axum::{
    Json, Router,
    routing::{delete, get, post, put},
};
use serde::Deserialize;

use crate::db::RepositoryError;
use crate::models::ApiResponse;
use crate::state::AppState;

/// Query parameters for error/success display on pages.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Fold a repository outcome into the JSON envelope.
///
/// Expected failures become readable `text`; unexpected ones are captured
/// and answered with a generic message so no internals leak to the page.
pub(crate) fn envelope(result: Result<(), RepositoryError>, ok_text: &str) -> Json<ApiResponse> {
    match result {
        Ok(()) => Json(ApiResponse::ok(ok_text)),
        Err(RepositoryError::NotFound) => Json(ApiResponse::fail("not found")),
        Err(RepositoryError::InvalidCredentials) => Json(ApiResponse::fail("wrong password")),
        Err(RepositoryError::Conflict(text)) => Json(ApiResponse::fail(text)),
        Err(err) => {
            sentry::capture_error(&err);
            tracing::error!(error = %err, "repository failure");
            Json(ApiResponse::fail("something went wrong"))
        }
    }
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show))
        .route("/edit", post(profile::edit))
        .route("/delete", post(profile::delete))
}

/// Create the collective routes router.
pub fn collective_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collective::show).post(collective::create))
        .route("/open", post(collective::open))
        .route("/edit", put(collective::edit))
        .route("/delete", delete(collective::delete))
}

/// Create the chore routes router.
pub fn chore_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chore::list))
        .route("/create", post(chore::create))
        .route("/edit", put(chore::edit))
        .route("/delete", delete(chore::delete))
}

/// Create all routes for CoClean.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::home))
        // Signup & auth
        .route("/signup", get(signup::signup_page).post(signup::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Profile
        .nest("/profile", profile_routes())
        // Collective
        .nest("/collective", collective_routes())
        // Chores
        .nest("/chore", chore_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success() {
        let Json(body) = envelope(Ok(()), "chore created");
        assert!(body.success);
        assert_eq!(body.text, "chore created");
    }

    #[test]
    fn test_envelope_wrong_password() {
        let Json(body) = envelope(Err(RepositoryError::InvalidCredentials), "deleted");
        assert!(!body.success);
        assert_eq!(body.text, "wrong password");
    }

    #[test]
    fn test_envelope_conflict_text_passes_through() {
        let Json(body) = envelope(
            Err(RepositoryError::Conflict("email already exists".to_string())),
            "created",
        );
        assert!(!body.success);
        assert_eq!(body.text, "email already exists");
    }

    #[test]
    fn test_envelope_hides_internal_errors() {
        let Json(body) = envelope(Err(RepositoryError::UnknownRoutineCode(7)), "done");
        assert!(!body.success);
        assert_eq!(body.text, "something went wrong");
    }
}
