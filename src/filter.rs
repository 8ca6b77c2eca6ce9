//! Search, category filter, and ordering for the note listing.

use std::cmp::Ordering;

use crate::models::{Category, Note};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => note.category == Some(*category),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<Category>().map(Self::Only)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    pub query: String,
    pub category: CategoryFilter,
}

impl NoteFilter {
    pub fn new(query: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// Filter and order `notes` for display. The input is not modified.
    pub fn apply(&self, notes: &[Note]) -> Vec<Note> {
        let query = if self.query.trim().is_empty() {
            None
        } else {
            Some(self.query.to_lowercase())
        };

        let mut result: Vec<Note> = notes
            .iter()
            .filter(|note| match &query {
                Some(q) => {
                    note.title.to_lowercase().contains(q.as_str())
                        || note.content.to_lowercase().contains(q.as_str())
                }
                None => true,
            })
            .filter(|note| self.category.matches(note))
            .cloned()
            .collect();

        result.sort_by(display_order);
        result
    }
}

/// Favorites first, then newest first.
pub fn display_order(a: &Note, b: &Note) -> Ordering {
    b.is_favorite
        .cmp(&a.is_favorite)
        .then_with(|| b.created_at.cmp(&a.created_at))
}
