//! Shared UI primitives
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `title: `
//! - Feedback: single word when possible: `Saved.`

use anyhow::Result;
use inquire::{ui::RenderConfig, Confirm, Select, Text};

const PAGE_SIZE: usize = 15;

/// Print a status message to stdout
#[inline]
pub fn status(msg: &str) {
    println!("{}", msg);
}

/// Print an error message to stderr
#[inline]
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

/// Truncate a string to max_chars, adding ellipsis if needed.
/// Result will be at most max_chars characters (including ellipsis if truncated).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    let truncate_at = max_chars.saturating_sub(1); // Leave room for ellipsis
    let mut truncate_idx = 0;

    for (count, (idx, _)) in s.char_indices().enumerate() {
        if count == truncate_at {
            truncate_idx = idx;
        }
        if count + 1 > max_chars {
            return format!("{}…", &s[..truncate_idx]);
        }
    }

    s.to_string()
}

/// Collapse a multi-line note body to a single preview line
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&flat, max_chars)
}

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Display a selection menu and return the chosen index
pub fn select<T: ToString + Clone>(prompt: &str, options: &[T]) -> Result<Option<usize>> {
    select_at(prompt, options, 0)
}

/// Like [`select`], with the cursor starting on `start`
pub fn select_at<T: ToString + Clone>(
    prompt: &str,
    options: &[T],
    start: usize,
) -> Result<Option<usize>> {
    if options.is_empty() {
        return Ok(None);
    }

    let items: Vec<String> = options.iter().map(|o| o.to_string()).collect();

    let result = Select::new(prompt, items)
        .with_render_config(minimal_render_config())
        .with_page_size(PAGE_SIZE)
        .with_vim_mode(true)
        .with_starting_cursor(start.min(options.len() - 1))
        .prompt_skippable()?;

    match result {
        Some(selected) => {
            // Find the index of the selected item
            let idx = options
                .iter()
                .position(|o| o.to_string() == selected)
                .unwrap_or(0);
            Ok(Some(idx))
        }
        None => Ok(None),
    }
}

/// Prompt for text input with optional default value
pub fn text_input(prompt: &str, default: Option<&str>) -> Result<Option<String>> {
    let mut builder = Text::new(prompt).with_render_config(minimal_render_config());

    if let Some(d) = default {
        if !d.is_empty() {
            builder = builder.with_default(d);
        }
    }

    let result = builder.prompt_skippable()?;
    Ok(result)
}

/// Prompt for yes/no confirmation (default: no)
pub fn confirm(prompt: &str) -> Result<bool> {
    let result = Confirm::new(prompt)
        .with_render_config(minimal_render_config())
        .with_default(false)
        .prompt()?;
    Ok(result)
}
