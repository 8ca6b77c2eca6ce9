//! Edit screen and favorite toggle

use anyhow::Result;

use super::resolve_note;
use super::ui::{select_at, status, text_input};
use crate::client::NotesClient;
use crate::models::{Category, NotePatch};

/// Execute the edit command.
///
/// With no field flags, prompts for title and content using the current
/// values as defaults. Only changed fields are sent.
pub fn run_edit(
    client: &mut NotesClient,
    identifier: &str,
    title: Option<String>,
    content: Option<String>,
    category: Option<Category>,
    clear_category: bool,
) -> Result<()> {
    let note = resolve_note(client, identifier)?;

    let mut patch = NotePatch {
        title,
        content,
        category: if clear_category {
            Some(None)
        } else {
            category.map(Some)
        },
        is_favorite: None,
    };

    if patch.is_empty() {
        let Some(new_title) = text_input("title:", Some(note.title.as_str()))? else {
            return Ok(());
        };
        let Some(new_content) = text_input("note:", Some(note.content.as_str()))? else {
            return Ok(());
        };
        if new_title != note.title {
            patch.title = Some(new_title);
        }
        if new_content != note.content {
            patch.content = Some(new_content);
        }

        let options = category_options();
        let Some(idx) = select_at("category:", &options, category_index(note.category))? else {
            return Ok(());
        };
        let new_category = category_at(idx);
        if new_category != note.category {
            patch.category = Some(new_category);
        }
    }

    if patch.is_empty() {
        status("No changes.");
        return Ok(());
    }

    client.update_note(note.id, &patch)?;
    status("Saved.");
    Ok(())
}

const NO_CATEGORY: &str = "none";

/// Category names followed by an entry for no category
fn category_options() -> Vec<&'static str> {
    Category::ALL
        .iter()
        .map(|c| c.as_str())
        .chain(std::iter::once(NO_CATEGORY))
        .collect()
}

fn category_index(category: Option<Category>) -> usize {
    category
        .and_then(|c| Category::ALL.iter().position(|&a| a == c))
        .unwrap_or(Category::ALL.len())
}

fn category_at(idx: usize) -> Option<Category> {
    Category::ALL.get(idx).copied()
}

/// Execute the favorite command: flip the flag
pub fn run_favorite(client: &mut NotesClient, identifier: &str) -> Result<()> {
    let note = resolve_note(client, identifier)?;
    let updated = client.set_favorite(note.id, !note.is_favorite)?;
    if updated.is_favorite {
        status("Favorited.");
    } else {
        status("Unfavorited.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_options_end_with_none() {
        let options = category_options();
        assert_eq!(options.len(), Category::ALL.len() + 1);
        assert_eq!(options.last(), Some(&NO_CATEGORY));
    }

    #[test]
    fn test_category_index_round_trips() {
        for category in Category::ALL {
            assert_eq!(category_at(category_index(Some(category))), Some(category));
        }
        assert_eq!(category_index(None), Category::ALL.len());
        assert_eq!(category_at(category_index(None)), None);
    }
}
