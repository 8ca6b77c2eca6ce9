//! Listing screen

use anyhow::Result;

use super::display::print_note_row;
use crate::client::NotesClient;
use crate::filter::{CategoryFilter, NoteFilter};

pub fn run_list(client: &mut NotesClient, query: &str, category: CategoryFilter) -> Result<()> {
    let notes = client.list_notes()?;

    if notes.is_empty() {
        println!("No notes yet.");
        return Ok(());
    }

    let filtered = NoteFilter::new(query, category).apply(&notes);
    if filtered.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    for note in &filtered {
        print_note_row(note);
    }

    if filtered.len() != notes.len() {
        println!("\n{} of {} notes", filtered.len(), notes.len());
    }

    Ok(())
}
