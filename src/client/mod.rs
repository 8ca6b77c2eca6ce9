//! HTTP client for the notes API.
//!
//! Reads are served from a [`ResponseCache`] once fetched. Successful writes
//! invalidate the affected note and the full list; failed writes leave the
//! cache alone.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

mod cache;

pub use cache::{CacheKey, CachedResponse, ResponseCache};

use crate::api::{note_path, ErrorResponse, NOTES_PATH};
use crate::models::{NewNote, Note, NotePatch};
use crate::validation::{validate_new_note, validate_note_patch, ValidationError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Note not found")]
    NotFound,
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

pub struct NotesClient {
    client: Client,
    base_url: String,
    cache: ResponseCache,
}

impl NotesClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &Url) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            cache: ResponseCache::new(),
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Fetch every note. Served from cache until a write invalidates it.
    pub fn list_notes(&mut self) -> Result<Vec<Note>> {
        let key = CacheKey::notes();
        if let Some(CachedResponse::List(notes)) = self.cache.get(&key) {
            return Ok(notes.clone());
        }

        let response = self.client.get(self.url(NOTES_PATH)).send()?;
        let notes: Vec<Note> = decode(check_status(response)?)?;
        self.cache.insert(key, CachedResponse::List(notes.clone()));
        Ok(notes)
    }

    pub fn get_note(&mut self, id: Uuid) -> Result<Note> {
        let key = CacheKey::note(id);
        if let Some(CachedResponse::Note(note)) = self.cache.get(&key) {
            return Ok(note.clone());
        }

        let response = self.client.get(self.url(&note_path(id))).send()?;
        let note: Note = decode(check_status(response)?)?;
        self.cache.insert(key, CachedResponse::Note(note.clone()));
        Ok(note)
    }

    pub fn create_note(&mut self, data: &NewNote) -> Result<Note> {
        validate_new_note(data)?;

        let response = self.client.post(self.url(NOTES_PATH)).json(data).send()?;
        let note: Note = decode(check_status(response)?)?;
        self.invalidate(note.id);
        Ok(note)
    }

    pub fn update_note(&mut self, id: Uuid, patch: &NotePatch) -> Result<Note> {
        validate_note_patch(patch)?;

        let response = self
            .client
            .patch(self.url(&note_path(id)))
            .json(patch)
            .send()?;
        let note: Note = decode(check_status(response)?)?;
        self.invalidate(id);
        Ok(note)
    }

    pub fn set_favorite(&mut self, id: Uuid, is_favorite: bool) -> Result<Note> {
        self.update_note(id, &NotePatch::favorite(is_favorite))
    }

    pub fn delete_note(&mut self, id: Uuid) -> Result<()> {
        let response = self.client.delete(self.url(&note_path(id))).send()?;
        check_status(response)?;
        self.invalidate(id);
        Ok(())
    }

    fn invalidate(&mut self, id: Uuid) {
        self.cache.invalidate(&CacheKey::note(id));
        self.cache.invalidate(&CacheKey::notes());
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map non-2xx responses to typed errors.
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: Option<ErrorResponse> = response.json().ok();
    match status {
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        StatusCode::BAD_REQUEST => {
            let details = body.as_ref().and_then(|b| b.details.clone());
            match details {
                Some(details) => Err(ClientError::Validation(ValidationError(details))),
                None => Err(ClientError::Server {
                    status: status.as_u16(),
                    message: body.map(|b| b.error).unwrap_or_else(|| status.to_string()),
                }),
            }
        }
        _ => Err(ClientError::Server {
            status: status.as_u16(),
            message: body.map(|b| b.error).unwrap_or_else(|| status.to_string()),
        }),
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json().map_err(ClientError::Decode)
}
