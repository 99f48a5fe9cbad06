//! chatview command-line entry point

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use chatview::cli::{Cli, Commands, ConfigCommands};

mod commands;

/// Env var holding a tracing filter directive (e.g. `chatview=trace`).
const LOG_ENV: &str = "CHATVIEW_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("chatview=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Show {
            path,
            json,
            theme,
            me,
        } => commands::show::handle(&path, json, theme, me),
        Commands::Translate { target, lang } => commands::enrich::handle_translate(&target, lang),
        Commands::Emotion { target } => commands::enrich::handle_emotion(&target),
        Commands::Reply { target } => commands::enrich::handle_reply(&target),
        Commands::Languages => commands::enrich::handle_languages(),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Set { key, value } => commands::config::handle_set(&key, &value),
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "chatview", &mut std::io::stdout());
            Ok(())
        }
    }
}
