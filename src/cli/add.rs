//! Create screen

use anyhow::Result;

use super::display::short_id;
use super::ui::{status, text_input};
use crate::client::NotesClient;
use crate::models::{Category, NewNote};

/// Execute the add command. Missing title or content is prompted for.
pub fn run_add(
    client: &mut NotesClient,
    title: Option<String>,
    content: Option<String>,
    category: Option<Category>,
    favorite: bool,
) -> Result<()> {
    let title = match title {
        Some(t) => t,
        None => match prompt("title:")? {
            Some(t) => t,
            None => return cancelled(),
        },
    };
    let content = match content {
        Some(c) => c,
        None => match prompt("note:")? {
            Some(c) => c,
            None => return cancelled(),
        },
    };

    let mut data = NewNote::new(title, content).favorite(favorite);
    data.category = category;

    let note = client.create_note(&data)?;
    status(&format!("Saved. ({})", short_id(&note)));
    Ok(())
}

/// Empty input or Escape cancels
fn prompt(label: &str) -> Result<Option<String>> {
    let answer = text_input(label, None)?;
    Ok(answer.filter(|s| !s.trim().is_empty()))
}

fn cancelled() -> Result<()> {
    status("Cancelled.");
    Ok(())
}
