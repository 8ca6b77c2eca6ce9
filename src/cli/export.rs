use anyhow::Result;
use std::path::Path;

use super::ui::status;
use crate::client::NotesClient;
use crate::export::write_backup;

/// Execute the export command
pub fn run_export(client: &mut NotesClient, dir: &Path) -> Result<()> {
    let notes = client.list_notes()?;

    match write_backup(&notes, dir)? {
        Some(path) => status(&format!(
            "Exported {} to {}",
            note_count(notes.len()),
            path.display()
        )),
        None => status("No notes to export."),
    }

    Ok(())
}

fn note_count(n: usize) -> String {
    if n == 1 {
        "1 note".to_string()
    } else {
        format!("{} notes", n)
    }
}
