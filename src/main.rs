use anyhow::Result;
use clap::Parser;
use heyonotes::cli::{
    run_add, run_delete, run_edit, run_export, run_favorite, run_list, run_menu, run_serve,
    run_show, ui, Cli, Commands,
};
use heyonotes::config::ClientConfig;
use heyonotes::logging::init_logging;
use heyonotes::NotesClient;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli { api_url, command } = cli;

    // The server owns its runtime; everything else talks to it over HTTP
    match command {
        Some(Commands::Serve(args)) => run_serve(args.bind, args.database),
        None => run_menu(&mut connect(api_url)?),
        Some(Commands::List(args)) => run_list(&mut connect(api_url)?, &args.query, args.category),
        Some(Commands::Show(args)) => run_show(&mut connect(api_url)?, &args.id),
        Some(Commands::Add(args)) => run_add(
            &mut connect(api_url)?,
            args.title,
            args.content,
            args.category,
            args.favorite,
        ),
        Some(Commands::Edit(args)) => run_edit(
            &mut connect(api_url)?,
            &args.id,
            args.title,
            args.content,
            args.category,
            args.clear_category,
        ),
        Some(Commands::Favorite(args)) => run_favorite(&mut connect(api_url)?, &args.id),
        Some(Commands::Delete(args)) => run_delete(&mut connect(api_url)?, &args.id, args.force),
        Some(Commands::Export(args)) => {
            let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
            run_export(&mut connect(api_url)?, &dir)
        }
    }
}

fn connect(api_url: Option<String>) -> Result<NotesClient> {
    let config = ClientConfig::load(api_url)?;
    Ok(NotesClient::new(&config.api_url)?)
}
