//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Given name of the logged-in user, if any.
    pub username: Option<String>,
}

/// Display the landing page, greeting the logged-in user when there is one.
pub async fn home(session: Session) -> impl IntoResponse {
    let user: Option<CurrentUser> = session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten();

    HomeTemplate {
        username: user.map(|u| u.name),
    }
}
