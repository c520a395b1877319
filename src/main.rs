//! SysRef CLI
//!
//! Command-line entry point. Without a subcommand it starts the interactive
//! terminal client; the subcommands run one catalog request and print the
//! result, for scripting.
//!
//! # Configuration Precedence
//!
//! 1. Command-line flags (`--url`, `--theme`)
//! 2. Environment (`SYSREF_URL`, `SYSREF_THEME`, `SYSREF_LOG`, `SYSREF_SEARCH_DELAY_MS`)
//! 3. Configuration file (`--config`, or `~/.config/sysref/config.toml`)
//! 4. Built-in defaults

#![allow(clippy::multiple_crate_versions)]

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use sysref::api::{Catalog, HttpCatalog, SearchQuery};
use sysref::domain::Entry;
use sysref::search::gateway::DELETE_QUESTION;
use sysref::search::{Clipboard, Prompt};
use sysref::terminal::{LinePrompt, SystemClipboard};
use sysref::ui::helpers::strip_marks;
use sysref::{Config, EntryId, Result};

/// SysRef - terminal client for your notes and snippets
///
/// Runs the interactive search UI when no command is given.
#[derive(Parser)]
#[command(name = "sysref")]
#[command(version)]
#[command(about = "Terminal client for the SysRef knowledge base", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/sysref/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SysRef server URL
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Built-in theme name (default, light)
    #[arg(long, global = true)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the most recently updated entries
    Recent {
        /// Number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Search entries
    Search {
        /// Search text
        #[arg(required = true, allow_hyphen_values = true)]
        query: Vec<String>,

        /// Only search this category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Maximum results
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// List categories
    Categories,

    /// Print one entry in full
    Show {
        /// Entry id
        id: i64,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Copy an entry's content to the clipboard
    Copy {
        /// Entry id
        id: i64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sysref: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(theme) = cli.theme {
        config.theme = Some(theme);
    }

    sysref::observability::init_tracing(&config);

    let outcome = match cli.command {
        None => sysref::terminal::run(&config),
        Some(command) => run_command(&config, command),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("sysref: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_command(config: &Config, command: Commands) -> Result<()> {
    let catalog = HttpCatalog::new(&config.base_url, config.request_timeout())?;
    let _span = tracing::debug_span!("cli_command", base_url = %catalog.base_url()).entered();

    match command {
        Commands::Recent { limit } => {
            print_entries(&catalog.recent(limit)?, false);
        }
        Commands::Search { query, category, limit } => {
            let Some(query) = SearchQuery::new(&query.join(" "), category.as_deref().unwrap_or(""), limit) else {
                Cli::command()
                    .error(ErrorKind::InvalidValue, "search text is empty")
                    .exit();
            };
            let results = catalog.search(&query)?;
            if results.is_empty() {
                println!("No results found for your search.");
            }
            print_entries(&results, true);
        }
        Commands::Categories => {
            for category in catalog.categories()? {
                println!("{category}");
            }
        }
        Commands::Show { id } => {
            let entry = catalog.fetch(EntryId(id))?;
            println!("{}", entry.title);
            println!("[{}]  Updated: {}", entry.category, entry.updated_display());
            if !entry.tags.is_empty() {
                println!("Tags: {}", entry.tags.join(", "));
            }
            println!();
            println!("{}", entry.content);
        }
        Commands::Delete { id, yes } => {
            if !yes && !LinePrompt.confirm(DELETE_QUESTION) {
                return Ok(());
            }
            catalog.delete(EntryId(id))?;
            println!("Entry deleted successfully");
        }
        Commands::Copy { id } => {
            let entry = catalog.fetch(EntryId(id))?;
            let mut clipboard = SystemClipboard::holding();
            if clipboard.holds_selection() {
                eprintln!("Serving the clipboard until something else is copied (Ctrl+C to stop)");
            }
            clipboard.write_text(&entry.content)?;
            println!("Content copied to clipboard");
        }
    }

    Ok(())
}

/// Prints one line per entry: id, updated time, category, title, and the
/// snippet (search) or preview (recent).
fn print_entries(entries: &[Entry], snippets: bool) {
    for entry in entries {
        let body = match entry.snippet.as_deref() {
            Some(snippet) if snippets => strip_marks(snippet).0,
            _ => entry.preview(),
        };
        println!(
            "{:>5}  {}  [{}]  {}",
            entry.id.0,
            entry.updated_display(),
            entry.category,
            entry.title
        );
        let body = body.replace(['\n', '\r', '\t'], " ");
        if !body.trim().is_empty() {
            println!("       {}", body.trim());
        }
    }
}
