use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use super::Database;
use crate::models::{Category, NewNote, Note, NotePatch};

const NOTE_COLUMNS: &str = "id, title, content, category, is_favorite, created_at";

/// Helper to convert UUID parse errors to rusqlite errors
fn parse_uuid(idx: usize, s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_category(idx: usize, s: Option<String>) -> rusqlite::Result<Option<Category>> {
    match s {
        None => Ok(None),
        Some(s) => s.parse::<Category>().map(Some).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
            )
        }),
    }
}

impl Database {
    // ==================== NOTE CREATE ====================

    /// Insert a new note. The store assigns `id` and `created_at`.
    pub fn create_note(&self, data: NewNote) -> Result<Note> {
        let note = Note::new(data);
        self.conn.execute(
            "INSERT INTO notes (id, title, content, category, is_favorite, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                note.id.to_string(),
                note.title,
                note.content,
                note.category.map(|c| c.as_str()),
                note.is_favorite as i32,
                note.created_at.to_rfc3339(),
            ],
        )?;
        Ok(note)
    }

    // ==================== NOTE READ ====================

    pub fn get_all_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM notes ORDER BY rowid ASC", NOTE_COLUMNS))?;

        let notes = stmt
            .query_map([], Self::row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    pub fn get_note_by_id(&self, id: Uuid) -> Result<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM notes WHERE id = ?", NOTE_COLUMNS))?;

        let result = stmt.query_row([id.to_string()], Self::row_to_note);

        match result {
            Ok(note) => Ok(Some(note)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ==================== NOTE UPDATE ====================

    /// Merge `patch` into the stored note. Returns `None` if no note has `id`.
    pub fn update_note(&self, id: Uuid, patch: NotePatch) -> Result<Option<Note>> {
        let tx = self.conn.unchecked_transaction()?;

        let Some(mut note) = self.get_note_by_id(id)? else {
            return Ok(None);
        };
        note.apply(patch);

        tx.execute(
            "UPDATE notes SET title = ?, content = ?, category = ?, is_favorite = ?
             WHERE id = ?",
            params![
                note.title,
                note.content,
                note.category.map(|c| c.as_str()),
                note.is_favorite as i32,
                note.id.to_string(),
            ],
        )?;
        tx.commit()?;

        Ok(Some(note))
    }

    // ==================== NOTE DELETE ====================

    /// Hard delete. Returns whether a note existed.
    pub fn delete_note(&self, id: Uuid) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
        let id: String = row.get(0)?;
        let category: Option<String> = row.get(3)?;
        let created_at: String = row.get(5)?;

        Ok(Note {
            id: parse_uuid(0, &id)?,
            title: row.get(1)?,
            content: row.get(2)?,
            category: parse_category(3, category)?,
            is_favorite: row.get::<_, i32>(4)? == 1,
            created_at: parse_timestamp(5, &created_at)?,
        })
    }
}
