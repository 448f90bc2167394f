//! Keepsake CLI - photo-tagged gift registry with conversational search.
//!
//! Keepsake registers physical items from photos, tags them automatically
//! (category, age ranges, themes, colors) and answers questions like
//! "What can we gift a 6-year-old?" with items that are still available.
//!
//! # Usage
//!
//! ```bash
//! # Register an item from its photos (the first one is analyzed)
//! keepsake ingest front.jpg back.jpg
//!
//! # Ask for gift ideas
//! keepsake search "Educational items for teens"
//!
//! # Manage items
//! keepsake list --availability available
//! keepsake gift <id> --recipient-name Sam --occasion birthday
//! ```

use clap::{Parser, Subcommand};
use keepsake_core::Config;
use std::path::PathBuf;

mod cli;
mod logging;

/// Keepsake - photo-tagged gift registry with conversational search.
#[derive(Parser, Debug)]
#[command(name = "keepsake")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "KEEPSAKE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a new item from its photos
    Ingest(cli::ingest::IngestArgs),

    /// Ask for available items in plain English
    Search(cli::search::SearchArgs),

    /// List items, optionally filtered
    List(cli::items::ListArgs),

    /// Show one item
    Show(cli::items::ShowArgs),

    /// Change an item's location, condition, notes or availability
    Update(cli::items::UpdateArgs),

    /// Delete an item
    Delete(cli::items::DeleteArgs),

    /// Record that an item was given away
    Gift(cli::items::GiftArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

/// Load the config file, falling back to defaults when it is unusable.
///
/// Logging isn't initialized yet, so warnings go through eprintln.
fn load_config(path: &std::path::Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match Config::load_from(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `keepsake config path`."
            );
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = load_config(&config_path);
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Keepsake v{}", keepsake_core::VERSION);

    match cli.command {
        Commands::Ingest(args) => cli::ingest::execute(args, &config).await,
        Commands::Search(args) => cli::search::execute(args, &config).await,
        Commands::List(args) => cli::items::list(args, &config).await,
        Commands::Show(args) => cli::items::show(args, &config).await,
        Commands::Update(args) => cli::items::update(args, &config).await,
        Commands::Delete(args) => cli::items::delete(args, &config).await,
        Commands::Gift(args) => cli::items::gift(args, &config).await,
        Commands::Config(args) => cli::config::execute(args, &config, &config_path).await,
    }
}
