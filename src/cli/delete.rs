use anyhow::Result;

use super::display::print_note_detail;
use super::resolve_note;
use super::ui::{confirm, status};
use crate::client::NotesClient;

/// Execute the delete command
pub fn run_delete(client: &mut NotesClient, identifier: &str, force: bool) -> Result<()> {
    let note = resolve_note(client, identifier)?;

    if !force {
        print_note_detail(&note);
        println!();

        if !confirm("delete?")? {
            status("Cancelled.");
            return Ok(());
        }
    }

    client.delete_note(note.id)?;
    status("Deleted.");
    Ok(())
}
