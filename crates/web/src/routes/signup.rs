//! Signup route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use coclean_core::Email;

use super::MessageQuery;
use crate::db::{RepositoryError, UserRepository};
use crate::models::NewUser;
use crate::state::AppState;

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
}

/// Display the signup page.
pub async fn signup_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    SignupTemplate {
        error: query.error.as_deref().map(friendly_error),
    }
}

/// Handle signup form submission.
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    if form.name.trim().is_empty() || form.surname.trim().is_empty() || form.password.is_empty() {
        return Redirect::to("/signup?error=missing_fields").into_response();
    }

    let Ok(email) = Email::parse(&form.email) else {
        return Redirect::to("/signup?error=invalid_email").into_response();
    };

    let new_user = NewUser {
        name: form.name.trim().to_owned(),
        surname: form.surname.trim().to_owned(),
        email,
        password: form.password,
    };

    match UserRepository::new(state.pool()).create(&new_user).await {
        Ok(()) => Redirect::to("/login?success=account_created").into_response(),
        Err(RepositoryError::Conflict(_)) => {
            Redirect::to("/signup?error=email_taken").into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "signup failed");
            Redirect::to("/signup?error=failed").into_response()
        }
    }
}

/// Map a signup error code to a readable message.
fn friendly_error(code: &str) -> String {
    match code {
        "missing_fields" => "Please fill in all the fields.",
        "invalid_email" => "That doesn't look like an email address.",
        "email_taken" => "An account with this email already exists.",
        _ => "Something went wrong. Please try again.",
    }
    .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_error_known_codes() {
        assert!(friendly_error("email_taken").contains("already exists"));
        assert!(friendly_error("invalid_email").contains("email"));
    }

    #[test]
    fn test_friendly_error_unknown_code_is_generic() {
        assert_eq!(
            friendly_error("anything-else"),
            "Something went wrong. Please try again."
        );
    }
}
