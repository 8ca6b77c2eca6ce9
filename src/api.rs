//! Wire contract shared by the server and the client.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::Issue;

pub const NOTES_PATH: &str = "/api/notes";

pub const MSG_NOT_FOUND: &str = "Note not found";
pub const MSG_INVALID_DATA: &str = "Invalid data";
pub const MSG_FETCH_NOTES_FAILED: &str = "Failed to fetch notes";
pub const MSG_FETCH_NOTE_FAILED: &str = "Failed to fetch note";
pub const MSG_CREATE_FAILED: &str = "Failed to create note";
pub const MSG_UPDATE_FAILED: &str = "Failed to update note";
pub const MSG_DELETE_FAILED: &str = "Failed to delete note";

pub fn note_path(id: Uuid) -> String {
    format!("{}/{}", NOTES_PATH, id)
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<Issue>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<Issue>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}
