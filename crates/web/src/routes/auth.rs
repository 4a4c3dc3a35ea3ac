//! Login and logout route handlers.
//!
//! Credentials are checked against the stored password exactly as the
//! database holds it; see DESIGN.md for the recorded hashing gap.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use coclean_core::Email;

use super::MessageQuery;
use crate::db::UserRepository;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(friendly_error),
        success: query
            .success
            .as_deref()
            .map(|_| "Account created. You can log in now.".to_owned()),
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let Ok(email) = Email::parse(&form.email) else {
        return Redirect::to("/login?error=credentials").into_response();
    };

    let lookup = UserRepository::new(state.pool())
        .get_with_password(&email)
        .await;

    match lookup {
        Ok(Some((user, stored_password))) if stored_password == form.password => {
            let current = CurrentUser {
                id: user.id,
                email: user.email,
                name: user.name,
            };

            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/login?error=session").into_response();
            }

            Redirect::to("/").into_response()
        }
        Ok(_) => {
            tracing::warn!(email = %email, "login rejected");
            Redirect::to("/login?error=credentials").into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "login lookup failed");
            Redirect::to("/login?error=failed").into_response()
        }
    }
}

/// Handle logout: drop the identity and the selected collective.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!("Failed to clear session on logout: {}", e);
    }
    let _ = session
        .remove::<String>(session_keys::CURRENT_COLLECTIVE)
        .await;

    Redirect::to("/").into_response()
}

/// Map a login error code to a readable message.
fn friendly_error(code: &str) -> String {
    match code {
        "credentials" => "Wrong email or password.",
        "session" => "Session expired, please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_error_credentials() {
        assert_eq!(friendly_error("credentials"), "Wrong email or password.");
    }

    #[test]
    fn test_friendly_error_unknown_code_is_generic() {
        assert_eq!(
            friendly_error("nope"),
            "Something went wrong. Please try again."
        );
    }
}
