mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordbox-cli", about = "Vocabulary flashcards with a Leitner schedule", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new word with an example sentence
    Add {
        word: String,
        /// Example usage (use "-" to read from stdin)
        context: String,
    },

    /// List all words
    List {
        /// Only show words in this box (1-6)
        #[arg(long = "box")]
        box_number: Option<u8>,
    },

    /// Search words and contexts
    Search {
        query: String,
    },

    /// Change a word's text or context
    Edit {
        /// Word to edit (case-insensitive)
        word: String,
        /// New word text
        #[arg(long = "word")]
        new_word: Option<String>,
        /// New context
        #[arg(long)]
        context: Option<String>,
    },

    /// Delete a word
    Delete {
        word: String,
    },

    /// Show words due for review today
    Due,

    /// Review due words interactively
    Review,

    /// Mark a word as mastered (never reviewed again)
    Master {
        word: String,
    },

    /// Export the collection as JSON
    Export {
        /// Only word and context, without learning progress
        #[arg(long)]
        words_only: bool,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Import words from a JSON export
    Import {
        /// File to import (use "-" for stdin)
        file: String,
    },

    /// Show collection statistics
    Stats,

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print current settings
    Show,

    /// Set the daily new-word limit (1-50)
    SetLimit {
        limit: u32,
    },

    /// Review every due new word, ignoring the limit
    Unlimited,
}

/// Resolve "-" as stdin
fn resolve_input(value: String) -> anyhow::Result<String> {
    if value == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        Ok(buf)
    } else {
        Ok(value)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let mut app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Add { word, context } => {
            let context = resolve_input(context)?;
            commands::add::run(&mut app, &word, &context, &cli.format, use_color)?;
        }
        Command::List { box_number } => {
            commands::list::run(&app, box_number, &cli.format, use_color)?;
        }
        Command::Search { query } => {
            commands::search::run(&app, &query, &cli.format, use_color)?;
        }
        Command::Edit { word, new_word, context } => {
            commands::edit::run(&mut app, &word, new_word.as_deref(), context.as_deref(), &cli.format)?;
        }
        Command::Delete { word } => {
            commands::delete::run(&mut app, &word, &cli.format)?;
        }
        Command::Due => {
            commands::due::run(&app, &cli.format, use_color)?;
        }
        Command::Review => {
            commands::review::run(&mut app, use_color)?;
        }
        Command::Master { word } => {
            commands::master::run(&mut app, &word, &cli.format)?;
        }
        Command::Export { words_only, output } => {
            commands::export::run(&app, words_only, output.as_deref())?;
        }
        Command::Import { file } => {
            commands::import::run(&mut app, &file, &cli.format)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Settings(subcmd) => match subcmd {
            SettingsCommand::Show => commands::settings::run_show(&app, &cli.format)?,
            SettingsCommand::SetLimit { limit } => commands::settings::run_set_limit(&mut app, limit)?,
            SettingsCommand::Unlimited => commands::settings::run_unlimited(&mut app)?,
        },
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
