use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::errors::ApiError;
use super::AppState;
use crate::api::{
    MSG_CREATE_FAILED, MSG_DELETE_FAILED, MSG_FETCH_NOTES_FAILED, MSG_FETCH_NOTE_FAILED,
    MSG_UPDATE_FAILED,
};
use crate::models::Note;
use crate::validation::{parse_json, parse_new_note, parse_note_patch};

/// A path segment that is not a UUID cannot name a stored note.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

/// `GET /api/notes`
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state
        .with_db(|db| db.get_all_notes())
        .await
        .map_err(ApiError::store(MSG_FETCH_NOTES_FAILED))?;
    Ok(Json(notes))
}

/// `GET /api/notes/:id`
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_id(&id)?;
    state
        .with_db(move |db| db.get_note_by_id(id))
        .await
        .map_err(ApiError::store(MSG_FETCH_NOTE_FAILED))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `POST /api/notes`
pub async fn create_note(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let data = parse_new_note(&parse_json(&body)?)?;
    let note = state
        .with_db(move |db| db.create_note(data))
        .await
        .map_err(ApiError::store(MSG_CREATE_FAILED))?;
    tracing::debug!(id = %note.id, "created note");
    Ok((StatusCode::CREATED, Json(note)))
}

/// `PATCH /api/notes/:id`
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Note>, ApiError> {
    // Validation runs first so a bad body is a 400 even for an unknown id
    let patch = parse_note_patch(&parse_json(&body)?)?;
    let id = parse_id(&id)?;
    state
        .with_db(move |db| db.update_note(id, patch))
        .await
        .map_err(ApiError::store(MSG_UPDATE_FAILED))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `DELETE /api/notes/:id`
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state
        .with_db(move |db| db.delete_note(id))
        .await
        .map_err(ApiError::store(MSG_DELETE_FAILED))?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    tracing::debug!(%id, "deleted note");
    Ok(StatusCode::NO_CONTENT)
}
