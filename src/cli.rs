//! Command-line interface definitions.
//!
//! Lives in the library so the xtask crate can generate man pages from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::ThemeName;

/// Chat export viewer
#[derive(Debug, Parser)]
#[command(name = "chatview", version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a chat export as a conversation
    ///
    /// PATH is either an exported .txt transcript or a directory holding an
    /// extracted export (transcript plus media files).
    Show {
        /// Transcript file or export directory
        path: PathBuf,

        /// Print messages as JSON instead of a conversation
        #[arg(long)]
        json: bool,

        /// Color theme (overrides config)
        #[arg(long, value_enum)]
        theme: Option<ThemeName>,

        /// Sender to show as "you" (defaults to the most frequent sender)
        #[arg(long)]
        me: Option<String>,
    },

    /// Translate a message with the configured backend
    Translate {
        #[command(flatten)]
        target: MessageArgs,

        /// Target language code (see `chatview languages`)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Detect the emotion of a message with the configured backend
    Emotion {
        #[command(flatten)]
        target: MessageArgs,
    },

    /// Suggest a reply to a message with the configured backend
    Reply {
        #[command(flatten)]
        target: MessageArgs,
    },

    /// List supported translation languages
    Languages,

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Selects one message of an export.
#[derive(Debug, Args)]
pub struct MessageArgs {
    /// Transcript file or export directory
    pub path: PathBuf,

    /// Message id as printed by `chatview show --json`
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Set one value and save the config file
    Set {
        /// Setting name, e.g. `display.language` or `enrich.program`
        key: String,
        /// New value (empty clears `display.me` and `enrich.program`)
        value: String,
    },
}
