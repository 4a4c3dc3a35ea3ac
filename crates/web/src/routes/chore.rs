//! Chore route handlers.
//!
//! The page scripts call the JSON endpoints with flat bodies; the
//! collective may be named in the body or fall back to the one selected
//! in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;

use super::envelope;
use crate::db::ChoreRepository;
use crate::error::AppError;
use crate::models::{ApiResponse, Chore, ChoreChanges, NewChore, session_keys};
use crate::state::AppState;

/// JSON body of `POST /chore/create`.
#[derive(Debug, Deserialize)]
pub struct CreateChoreBody {
    pub collective: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub frequency: i32,
}

/// JSON body of `PUT /chore/edit`.
#[derive(Debug, Deserialize)]
pub struct EditChoreBody {
    pub collective: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub frequency: i32,
}

/// JSON body of `DELETE /chore/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteChoreBody {
    pub collective: Option<String>,
    pub title: String,
    pub password: String,
}

/// Chore list page template.
#[derive(Template, WebTemplate)]
#[template(path = "chores.html")]
pub struct ChoresTemplate {
    /// Name of the selected collective, if any.
    pub collective: Option<String>,
    pub chores: Vec<Chore>,
}

/// Resolve the collective a request is about: the body names it, or the
/// session has one selected.
async fn resolve_collective(body_value: Option<String>, session: &Session) -> Option<String> {
    if let Some(name) = body_value {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_owned());
        }
    }

    session
        .get::<String>(session_keys::CURRENT_COLLECTIVE)
        .await
        .ok()
        .flatten()
}

/// Display the chore list: the selected collective's chores, or every
/// chore when nothing is selected.
pub async fn list(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    let selected: Option<String> = session
        .get(session_keys::CURRENT_COLLECTIVE)
        .await
        .ok()
        .flatten();

    let repo = ChoreRepository::new(state.pool());

    let chores = match &selected {
        Some(name) => repo.list_for_collective(name).await?,
        None => repo.list_all().await?,
    };

    Ok(ChoresTemplate {
        collective: selected,
        chores,
    }
    .into_response())
}

/// Create a chore (JSON).
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CreateChoreBody>,
) -> Json<ApiResponse> {
    let Some(collective) = resolve_collective(body.collective, &session).await else {
        return Json(ApiResponse::fail("no collective selected"));
    };

    if body.title.trim().is_empty() {
        return Json(ApiResponse::fail("chore title is required"));
    }
    if body.frequency <= 0 {
        return Json(ApiResponse::fail("frequency must be a positive number of days"));
    }

    let new_chore = NewChore {
        collective,
        title: body.title.trim().to_owned(),
        description: body.description,
        start_date: body.start_date,
        frequency_days: body.frequency,
    };

    let result = ChoreRepository::new(state.pool()).create(&new_chore).await;

    envelope(result, "chore created")
}

/// Update a chore (JSON), keyed by collective + title.
pub async fn edit(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<EditChoreBody>,
) -> Json<ApiResponse> {
    let Some(collective) = resolve_collective(body.collective, &session).await else {
        return Json(ApiResponse::fail("no collective selected"));
    };

    if body.title.trim().is_empty() {
        return Json(ApiResponse::fail("chore title is required"));
    }
    if body.frequency <= 0 {
        return Json(ApiResponse::fail("frequency must be a positive number of days"));
    }

    let changes = ChoreChanges {
        collective,
        title: body.title.trim().to_owned(),
        description: body.description,
        frequency_days: body.frequency,
    };

    let result = ChoreRepository::new(state.pool()).update(&changes).await;

    envelope(result, "chore updated")
}

/// Delete a chore (JSON). The collective's password authorizes the
/// deletion; a wrong password leaves the chore in place.
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<DeleteChoreBody>,
) -> Json<ApiResponse> {
    let Some(collective) = resolve_collective(body.collective, &session).await else {
        return Json(ApiResponse::fail("no collective selected"));
    };

    let result = ChoreRepository::new(state.pool())
        .delete(&collective, body.title.trim(), &body.password)
        .await;

    envelope(result, "chore deleted")
}
