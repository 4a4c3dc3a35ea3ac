//! Profile route handlers (requires auth).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use super::MessageQuery;
use crate::db::{RepositoryError, UserRepository};
use crate::error::AppError;
use crate::middleware::{RequireAuth, set_current_user};
use crate::models::{CurrentUser, User, UserChanges};
use crate::state::AppState;

/// Profile edit form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub surname: String,
    pub password: String,
}

/// Account deletion form data.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub password: String,
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub user: User,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display the profile page.
pub async fn show(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Result<Response, AppError> {
    let user = UserRepository::new(state.pool())
        .get_by_email(&current.email)
        .await?;

    // The account can disappear underneath a live session
    let Some(user) = user else {
        return Ok(Redirect::to("/logout").into_response());
    };

    Ok(ProfileTemplate {
        user,
        error: query.error.as_deref().map(friendly_error),
        success: query.success.as_deref().map(|_| "Saved.".to_owned()),
    }
    .into_response())
}

/// Handle profile edit form submission.
pub async fn edit(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Response {
    if form.name.trim().is_empty() || form.surname.trim().is_empty() || form.password.is_empty() {
        return Redirect::to("/profile?error=missing_fields").into_response();
    }

    let changes = UserChanges {
        name: form.name.trim().to_owned(),
        surname: form.surname.trim().to_owned(),
        email: current.email.clone(),
        password: form.password,
    };

    match UserRepository::new(state.pool()).update(&changes).await {
        Ok(()) => {
            // Keep the greeting in sync with the new name
            let refreshed = CurrentUser {
                id: current.id,
                email: current.email,
                name: changes.name,
            };
            if let Err(e) = set_current_user(&session, &refreshed).await {
                tracing::warn!("Failed to refresh session after edit: {}", e);
            }

            Redirect::to("/profile?success=saved").into_response()
        }
        Err(RepositoryError::NotFound) => Redirect::to("/logout").into_response(),
        Err(err) => {
            tracing::error!(error = %err, "profile edit failed");
            Redirect::to("/profile?error=failed").into_response()
        }
    }
}

/// Handle account deletion. The password is confirmed by the
/// `delete_user` routine; the session is destroyed afterwards.
pub async fn delete(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<DeleteForm>,
) -> Response {
    match UserRepository::new(state.pool())
        .delete(&current.email, &form.password)
        .await
    {
        Ok(()) => {
            if let Err(e) = session.flush().await {
                tracing::warn!("Failed to destroy session after deletion: {}", e);
            }
            Redirect::to("/").into_response()
        }
        Err(RepositoryError::InvalidCredentials) => {
            Redirect::to("/profile?error=wrong_password").into_response()
        }
        Err(RepositoryError::NotFound) => Redirect::to("/logout").into_response(),
        Err(err) => {
            tracing::error!(error = %err, "account deletion failed");
            Redirect::to("/profile?error=failed").into_response()
        }
    }
}

/// Map a profile error code to a readable message.
fn friendly_error(code: &str) -> String {
    match code {
        "missing_fields" => "Please fill in all the fields.",
        "wrong_password" => "Wrong password.",
        _ => "Something went wrong. Please try again.",
    }
    .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_error_wrong_password() {
        assert_eq!(friendly_error("wrong_password"), "Wrong password.");
    }
}
