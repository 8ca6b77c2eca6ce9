use chrono::{DateTime, Local, Utc};

use super::ui::{preview, truncate};
use crate::models::Note;

const TITLE_WIDTH: usize = 32;
const PREVIEW_WIDTH: usize = 48;

/// First eight characters of the id, enough to address a note from the CLI
pub fn short_id(note: &Note) -> String {
    note.id.to_string().chars().take(8).collect()
}

/// Format a creation date the way the listing shows it: "Mar 7, 2026"
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%b %-d, %Y").to_string()
}

/// One line per note: favorite marker, short id, date, category, title, preview
pub fn print_note_row(note: &Note) {
    let marker = if note.is_favorite { "*" } else { " " };
    let category = note.category.map(|c| c.as_str()).unwrap_or("-");
    println!(
        "{} {}  {:<12}  {:<5}  {:<width$}  {}",
        marker,
        short_id(note),
        format_date(&note.created_at),
        category,
        truncate(&note.title, TITLE_WIDTH),
        preview(&note.content, PREVIEW_WIDTH),
        width = TITLE_WIDTH,
    );
}

/// Full note with clean formatting (only non-empty fields)
pub fn print_note_detail(note: &Note) {
    let star = if note.is_favorite { " *" } else { "" };
    println!("{}{}\n", note.title, star);

    let mut meta = vec![format_date(&note.created_at)];
    if let Some(category) = note.category {
        meta.push(category.to_string());
    }
    println!("  {}", meta.join(" · "));
    println!("  {}\n", note.id);

    for line in note.content.lines() {
        println!("  {}", line);
    }
}
