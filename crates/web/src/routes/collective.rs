//! Collective route handlers.
//!
//! The page works on the collective selected in the session; the edit and
//! delete endpoints answer the `{success, text}` envelope consumed by
//! `static/js/collective/edit.js`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use super::envelope;
use crate::db::{ChoreRepository, CollectiveRepository, RepositoryError};
use crate::error::AppError;
use crate::models::{ApiResponse, Chore, Collective, NewCollective, session_keys};
use crate::state::AppState;

/// Collective creation form data.
#[derive(Debug, Deserialize)]
pub struct CreateCollectiveForm {
    pub name: String,
    pub description: String,
    pub school: String,
    pub password: String,
}

/// Collective selection form data.
#[derive(Debug, Deserialize)]
pub struct OpenCollectiveForm {
    pub name: String,
}

/// JSON body of `PUT /collective/edit`.
#[derive(Debug, Deserialize)]
pub struct EditCollectiveBody {
    pub name: String,
    pub description: String,
    pub school: String,
}

/// Collective page template.
#[derive(Template, WebTemplate)]
#[template(path = "collective.html")]
pub struct CollectiveTemplate {
    /// The collective selected in this session, if any.
    pub collective: Option<Collective>,
    /// Its chores (empty when nothing is selected).
    pub chores: Vec<Chore>,
    /// All collectives, for picking one.
    pub collectives: Vec<Collective>,
}

/// Display the collective page: the selected collective with its chores,
/// plus the list of all collectives.
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    let selected: Option<String> = session
        .get(session_keys::CURRENT_COLLECTIVE)
        .await
        .ok()
        .flatten();

    let repo = CollectiveRepository::new(state.pool());

    let collective = match selected {
        Some(name) => repo.get_by_name(&name).await?,
        None => None,
    };

    let chores = match &collective {
        Some(c) => {
            ChoreRepository::new(state.pool())
                .list_for_collective(&c.name)
                .await?
        }
        None => Vec::new(),
    };

    let collectives = repo.list_all().await?;

    Ok(CollectiveTemplate {
        collective,
        chores,
        collectives,
    }
    .into_response())
}

/// Create a collective and select it for this session.
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CreateCollectiveForm>,
) -> Response {
    if form.name.trim().is_empty() || form.password.is_empty() {
        return Redirect::to("/collective?error=missing_fields").into_response();
    }

    let new_collective = NewCollective {
        name: form.name.trim().to_owned(),
        description: form.description,
        school: form.school,
        password: form.password,
    };

    match CollectiveRepository::new(state.pool())
        .create(&new_collective)
        .await
    {
        Ok(()) => {
            if let Err(e) = session
                .insert(session_keys::CURRENT_COLLECTIVE, &new_collective.name)
                .await
            {
                tracing::warn!("Failed to remember collective: {}", e);
            }
            Redirect::to("/collective").into_response()
        }
        Err(RepositoryError::Conflict(_)) => {
            Redirect::to("/collective?error=name_taken").into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "collective creation failed");
            Redirect::to("/collective?error=failed").into_response()
        }
    }
}

/// Select an existing collective for this session.
pub async fn open(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OpenCollectiveForm>,
) -> Result<Response, AppError> {
    let found = CollectiveRepository::new(state.pool())
        .get_by_name(form.name.trim())
        .await?;

    let Some(collective) = found else {
        return Ok(Redirect::to("/collective?error=unknown").into_response());
    };

    if let Err(e) = session
        .insert(session_keys::CURRENT_COLLECTIVE, &collective.name)
        .await
    {
        tracing::warn!("Failed to remember collective: {}", e);
    }

    Ok(Redirect::to("/collective").into_response())
}

/// Update a collective (JSON). The body carries the name key, matching
/// the page script's payload.
pub async fn edit(
    State(state): State<AppState>,
    Json(body): Json<EditCollectiveBody>,
) -> Json<ApiResponse> {
    if body.name.trim().is_empty() {
        return Json(ApiResponse::fail("collective name is required"));
    }

    let result = CollectiveRepository::new(state.pool())
        .update(body.name.trim(), &body.description, &body.school)
        .await;

    envelope(result, "collective updated")
}

/// Delete the collective selected in this session (JSON, no body).
pub async fn delete(State(state): State<AppState>, session: Session) -> Json<ApiResponse> {
    let selected: Option<String> = session
        .get(session_keys::CURRENT_COLLECTIVE)
        .await
        .ok()
        .flatten();

    let Some(name) = selected else {
        return Json(ApiResponse::fail("no collective selected"));
    };

    let result = CollectiveRepository::new(state.pool()).delete(&name).await;

    if result.is_ok()
        && let Err(e) = session
            .remove::<String>(session_keys::CURRENT_COLLECTIVE)
            .await
    {
        tracing::warn!("Failed to forget collective: {}", e);
    }

    envelope(result, "collective deleted")
}
