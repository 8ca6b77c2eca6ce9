//! JSON backup of the note list.

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Note;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesExport<'a> {
    pub exported_at: DateTime<Utc>,
    pub total_notes: usize,
    pub notes: &'a [Note],
}

impl<'a> NotesExport<'a> {
    pub fn new(notes: &'a [Note]) -> Self {
        Self {
            exported_at: Utc::now(),
            total_notes: notes.len(),
            notes,
        }
    }

    /// Two-space indented JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("heyo-notes-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Write a backup of `notes` into `dir`. Returns `None` when there is nothing to export.
pub fn write_backup(notes: &[Note], dir: &Path) -> Result<Option<PathBuf>> {
    if notes.is_empty() {
        return Ok(None);
    }

    let path = dir.join(backup_file_name(Local::now().date_naive()));
    let json = NotesExport::new(notes).to_json()?;
    fs::write(&path, json)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewNote};

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(backup_file_name(date), "heyo-notes-backup-2026-03-07.json");
    }

    #[test]
    fn test_export_document_shape() {
        let notes = vec![
            Note::new(NewNote::new("Hi", "World").with_category(Category::Sely)),
            Note::new(NewNote::new("Bye", "Moon").favorite(true)),
        ];
        let json = NotesExport::new(&notes).to_json().unwrap();
        assert!(json.contains("\n  \"exportedAt\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalNotes"], 2);
        assert_eq!(value["notes"][0]["title"], "Hi");
        assert_eq!(value["notes"][0]["category"], "Sely");
        assert_eq!(value["notes"][1]["isFavorite"], true);
        assert!(value["notes"][1]["category"].is_null());

        let keys: Vec<_> = value["notes"][0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn test_write_backup() {
        let dir = tempfile::tempdir().unwrap();
        let notes = vec![Note::new(NewNote::new("Hi", "World"))];

        let path = write_backup(&notes, dir.path()).unwrap().unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("heyo-notes-backup-"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["notes"][0]["id"], notes[0].id.to_string());
    }

    #[test]
    fn test_empty_list_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_backup(&[], dir.path()).unwrap().is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
