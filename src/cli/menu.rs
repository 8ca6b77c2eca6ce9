//! Landing screen
//!
//! Uses inquire for clean, reliable terminal interaction.

use anyhow::Result;
use inquire::{Select, Text};
use std::io::{self, IsTerminal};
use std::path::Path;

use crate::cli::ui::minimal_render_config;
use crate::cli::{run_add, run_export, run_list, run_show};
use crate::client::NotesClient;
use crate::filter::CategoryFilter;

const TITLE: &str = "Sely's Notes";
const TAGLINE: &str = "The place where memories are kept";

/// Menu options with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Write,
    Read,
    Search,
    Open,
    Export,
    Quit,
}

impl MenuOption {
    const ALL: &'static [MenuOption] = &[
        MenuOption::Write,
        MenuOption::Read,
        MenuOption::Search,
        MenuOption::Open,
        MenuOption::Export,
        MenuOption::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuOption::Write => "Write a Note",
            MenuOption::Read => "Read Old Notes",
            MenuOption::Search => "Search",
            MenuOption::Open => "Open",
            MenuOption::Export => "Export",
            MenuOption::Quit => "Quit",
        }
    }

    fn from_label(s: &str) -> Option<MenuOption> {
        MenuOption::ALL.iter().find(|opt| opt.label() == s).copied()
    }
}

/// Run the landing screen
pub fn run_menu(client: &mut NotesClient) -> Result<()> {
    println!("{}\n{}\n", TITLE, TAGLINE);

    // Without a terminal, show the commands instead of a menu
    if !io::stdin().is_terminal() {
        println!(
            "  heyonotes add       write a note\n  \
             heyonotes list      read old notes\n  \
             heyonotes export    save a backup\n  \
             heyonotes serve     run the API server\n\n\
             Run 'heyonotes --help' for all options."
        );
        return Ok(());
    }

    let menu_labels: Vec<&str> = MenuOption::ALL.iter().map(|opt| opt.label()).collect();

    loop {
        let selection = Select::new("", menu_labels.clone())
            .with_render_config(minimal_render_config())
            .with_page_size(menu_labels.len())
            .with_vim_mode(true)
            .prompt_skippable();

        // Handle prompt errors (Ctrl+C, terminal issues) - exit gracefully
        let Ok(Some(choice_label)) = selection else {
            return Ok(());
        };

        let Some(choice) = MenuOption::from_label(choice_label) else {
            continue;
        };

        if choice == MenuOption::Quit {
            return Ok(());
        }

        // Errors are shown and the menu continues
        if let Err(e) = execute_command(client, choice) {
            eprintln!("\nError: {:#}", e);
        }
        println!();
    }
}

fn execute_command(client: &mut NotesClient, choice: MenuOption) -> Result<()> {
    match choice {
        MenuOption::Write => run_add(client, None, None, None, false),
        MenuOption::Read => run_list(client, "", CategoryFilter::All),
        MenuOption::Search => {
            let query = prompt_for_input("search: ")?;
            run_list(client, &query, CategoryFilter::All)
        }
        MenuOption::Open => {
            let id = prompt_for_input("id: ")?;
            if id.is_empty() {
                return Ok(());
            }
            run_show(client, &id)
        }
        MenuOption::Export => run_export(client, Path::new(".")),
        MenuOption::Quit => Ok(()),
    }
}

/// Prompt for text input, returning empty string on cancel
fn prompt_for_input(label: &str) -> Result<String> {
    let result = Text::new(label)
        .with_render_config(minimal_render_config())
        .prompt_skippable()?;
    Ok(result.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_option_roundtrip() {
        for opt in MenuOption::ALL {
            let label = opt.label();
            let recovered = MenuOption::from_label(label);
            assert_eq!(recovered, Some(*opt), "Failed roundtrip for {:?}", opt);
        }
    }

    #[test]
    fn test_menu_option_from_invalid_label() {
        assert_eq!(MenuOption::from_label("Invalid"), None);
        assert_eq!(MenuOption::from_label(""), None);
    }
}
