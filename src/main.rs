//! Cookshelf CLI - Command-line interface for the cookbook collection catalog

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use cookshelf::config::{self, ShelfConfig};
use cookshelf::storage::CatalogStore;
use cookshelf::NewCookbook;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "cookshelf")]
#[command(version)]
#[command(about = "Cookbook collection catalog - tags and aesthetic analytics on SQLite")]
#[command(long_about = r#"
Cookshelf keeps track of your cookbook collection:
  • Cookbooks with year, aesthetic rating, Instagram flag and cover color
  • Free-text tags shared across cookbooks
  • Rating averages, yearly trends and collection gaps

Example usage:
  cookshelf seed
  cookshelf add --title "Fermented Everything" --author "Jim Kombucha" --year 2021 --rating 3
  cookshelf top --min-rating 5
  cookshelf analytics --format json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the catalog tables
    Init {
        /// Also write a config file pointing at the database
        #[arg(long)]
        write_config: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Add a cookbook
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        author: String,

        /// Year of publication
        #[arg(short, long)]
        year: Option<i32>,

        /// Aesthetic rating, usually 1-5
        #[arg(short, long)]
        rating: Option<i64>,

        /// Mark as Instagram-worthy
        #[arg(short, long)]
        instagram: bool,

        /// Cover color
        #[arg(long)]
        color: Option<String>,

        /// Tags to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Attach tags to a cookbook
    Tag {
        /// Cookbook id
        #[arg(short, long)]
        id: i64,

        /// Tag names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List every cookbook
    List {
        /// Only Instagram-worthy cookbooks
        #[arg(short, long)]
        instagram: bool,
    },

    /// List every known tag
    Tags,

    /// Show one cookbook with its tags
    Show {
        /// Cookbook id
        #[arg(short, long)]
        id: i64,
    },

    /// Cookbooks rated at least N, ordered by cover color
    Top {
        #[arg(short, long, default_value = "5")]
        min_rating: i64,
    },

    /// Cookbooks carrying a tag
    Tagged {
        name: String,
    },

    /// Average rating, yearly trends and collection gaps
    Analytics,

    /// Insert the sample collection
    Seed,

    /// Show statistics about the catalog
    Stats,
}

impl Commands {
    /// Name reported in JSON envelopes
    fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::Add { .. } => "add",
            Commands::Tag { .. } => "tag",
            Commands::List { .. } => "list",
            Commands::Tags => "tags",
            Commands::Show { .. } => "show",
            Commands::Top { .. } => "top",
            Commands::Tagged { .. } => "tagged",
            Commands::Analytics => "analytics",
            Commands::Seed => "seed",
            Commands::Stats => "stats",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        *self == OutputMode::Text
    }
}

/// Print a machine-readable success envelope
pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn error_envelope(command: &str, error: &anyhow::Error) -> serde_json::Value {
    serde_json::json!({
        "ok": false,
        "command": command,
        "error": format!("{:#}", error),
    })
}

/// Report a failed command: an envelope on stdout for JSON, a red line on stderr otherwise
fn emit_error(output_mode: OutputMode, command: &str, error: &anyhow::Error) {
    if output_mode.is_human() {
        cookshelf::ui::error(&format!("{:#}", error));
        return;
    }
    match serde_json::to_string_pretty(&error_envelope(command, error)) {
        Ok(json) => println!("{}", json),
        Err(_) => cookshelf::ui::error(&format!("{:#}", error)),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let shelf_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let database = shelf_config.database_path(cli.database.as_deref());
    let mode = cli.format;
    let command = cli.command.name();

    tracing::debug!("Opening {:?}", database);
    let store = match CatalogStore::open_with(&database, shelf_config.store_options()) {
        Ok(store) => store,
        Err(e) => {
            emit_error(mode, command, &e.into());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Init { write_config, force } => {
            let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
            let to_write = write_config.then(|| ShelfConfig {
                database: Some(database.display().to_string()),
                enforce_foreign_keys: Some(shelf_config.store_options().enforce_foreign_keys),
            });
            commands::run_init(&store, mode, to_write.map(|c| (config_path, c)), force)
        }
        Commands::Add { title, author, year, rating, instagram, color, tags } => {
            let mut cookbook = NewCookbook::new(title, author).instagram_worthy(instagram);
            cookbook.year_published = year;
            cookbook.aesthetic_rating = rating;
            cookbook.cover_color = color;
            commands::run_add(&store, mode, &cookbook, &tags)
        }
        Commands::Tag { id, names } => commands::run_tag(&store, mode, id, &names),
        Commands::List { instagram } => commands::run_list(&store, mode, instagram),
        Commands::Tags => commands::run_tags(&store, mode),
        Commands::Show { id } => commands::run_show(&store, mode, id),
        Commands::Top { min_rating } => commands::run_top(&store, mode, min_rating),
        Commands::Tagged { name } => commands::run_tagged(&store, mode, &name),
        Commands::Analytics => commands::run_analytics(&store, mode),
        Commands::Seed => commands::run_seed(&store, mode),
        Commands::Stats => commands::run_stats(&store, mode),
    };

    // Release the connection before reporting a command failure
    let result = result.and(store.close().map_err(anyhow::Error::from));
    if let Err(e) = result {
        emit_error(mode, command, &e);
        std::process::exit(1);
    }
    Ok(())
}
