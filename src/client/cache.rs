use std::collections::HashMap;
use uuid::Uuid;

use crate::api::NOTES_PATH;
use crate::models::Note;

/// Cache key: a resource path, optionally narrowed to one note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub path: &'static str,
    pub id: Option<Uuid>,
}

impl CacheKey {
    pub fn notes() -> Self {
        Self {
            path: NOTES_PATH,
            id: None,
        }
    }

    pub fn note(id: Uuid) -> Self {
        Self {
            path: NOTES_PATH,
            id: Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedResponse {
    List(Vec<Note>),
    Note(Note),
}

/// Last successful GET response per key. Entries live until invalidated.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: HashMap<CacheKey, CachedResponse>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&CachedResponse> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: CacheKey, response: CachedResponse) {
        self.entries.insert(key, response);
    }

    /// Drop one entry so the next read refetches. Returns whether it existed.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
