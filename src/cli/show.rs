use anyhow::Result;

use super::display::print_note_detail;
use super::resolve_note;
use crate::client::NotesClient;

/// Execute the show command
pub fn run_show(client: &mut NotesClient, identifier: &str) -> Result<()> {
    let note = resolve_note(client, identifier)?;
    print_note_detail(&note);
    Ok(())
}
