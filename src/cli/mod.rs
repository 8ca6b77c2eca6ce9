use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

pub mod add;
pub mod delete;
pub mod display;
pub mod export;
pub mod list;
pub mod menu;
pub mod serve;
pub mod show;
pub mod ui;
pub mod update;

pub use add::run_add;
pub use delete::run_delete;
pub use export::run_export;
pub use list::run_list;
pub use menu::run_menu;
pub use serve::run_serve;
pub use show::run_show;
pub use update::{run_edit, run_favorite};

use crate::client::{ClientError, NotesClient};
use crate::filter::CategoryFilter;
use crate::models::{Category, Note};

#[derive(Parser)]
#[command(name = "heyonotes")]
#[command(about = "Personal notes with a REST API")]
#[command(version)]
pub struct Cli {
    /// Base URL of the notes API (default: $HEYO_API_URL or http://127.0.0.1:5000)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    Serve(ServeArgs),
    /// List notes, favorites first
    List(ListArgs),
    /// Show a note in full
    Show(IdArgs),
    /// Write a new note
    Add(AddArgs),
    /// Edit a note's title, content or category
    Edit(EditArgs),
    /// Toggle a note's favorite flag
    Favorite(IdArgs),
    /// Delete a note permanently
    Delete(DeleteArgs),
    /// Save all notes to a JSON backup file
    Export(ExportArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (default: $HEYO_BIND or 127.0.0.1:5000)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,
    /// SQLite database path or `:memory:` (default: $DATABASE_URL)
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only notes whose title or content contains this text
    #[arg(short, long, default_value = "")]
    pub query: String,
    /// Author name, or "all"
    #[arg(short, long, default_value = "all")]
    pub category: CategoryFilter,
}

#[derive(Args)]
pub struct IdArgs {
    /// Note id or a unique prefix of it
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub content: Option<String>,
    #[arg(short = 'a', long)]
    pub category: Option<Category>,
    /// Mark as favorite
    #[arg(short, long)]
    pub favorite: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Note id or a unique prefix of it
    pub id: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub content: Option<String>,
    #[arg(short = 'a', long, conflicts_with = "clear_category")]
    pub category: Option<Category>,
    /// Remove the note's category
    #[arg(long)]
    pub clear_category: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Note id or a unique prefix of it
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Directory to write the backup into (default: current directory)
    #[arg(short, long, value_name = "PATH")]
    pub dir: Option<PathBuf>,
}

/// Find a note by full id or unique id prefix.
///
/// Several prefix matches open a selection menu.
pub fn resolve_note(client: &mut NotesClient, identifier: &str) -> Result<Note> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(anyhow!("Identifier cannot be empty."));
    }

    if let Ok(id) = Uuid::parse_str(identifier) {
        return match client.get_note(id) {
            Ok(note) => Ok(note),
            Err(ClientError::NotFound) => Err(anyhow!("No note found with ID: {}", identifier)),
            Err(e) => Err(e.into()),
        };
    }

    let prefix = identifier.to_lowercase();
    let mut matches: Vec<Note> = client
        .list_notes()?
        .into_iter()
        .filter(|n| n.id.to_string().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Err(anyhow!("No note found with ID: {}", identifier)),
        1 => Ok(matches.remove(0)),
        _ => {
            let options: Vec<String> = matches
                .iter()
                .map(|n| format!("{}  {}", n.id, ui::truncate(&n.title, 40)))
                .collect();
            match ui::select("", &options)? {
                Some(idx) => Ok(matches.remove(idx)),
                None => Err(anyhow!("No note selected.")),
            }
        }
    }
}
