//! # MindVault CLI (`mindvault`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mindvault init` | Create the SQLite database and schema |
//! | `mindvault add --title T "<text>"` | Add a note (`-` reads stdin) |
//! | `mindvault add-file <path>` | Add a `.txt` or `.md` file |
//! | `mindvault search "<query>"` | Ranked matching chunks |
//! | `mindvault ask "<query>"` | Context response with sources |
//! | `mindvault docs` | List stored documents |
//! | `mindvault get <id>` | Show a document and its chunks |
//! | `mindvault stats` | Document and chunk counts |

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mindvault::config::{self, Config};
use mindvault::{documents, ingest, search, stats};

/// MindVault: store notes and retrieve them by lexical similarity.
#[derive(Parser)]
#[command(name = "mindvault", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/mindvault.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema. Safe to run repeatedly.
    Init,

    /// Add a text note.
    Add {
        /// Note content, or `-` to read from stdin.
        content: String,

        #[arg(long)]
        title: String,

        /// Comma separated tags.
        #[arg(long)]
        tags: Option<String>,

        /// Originating path, recorded as metadata only.
        #[arg(long)]
        path: Option<String>,
    },

    /// Add a UTF-8 `.txt` or `.md` file.
    AddFile {
        file: PathBuf,

        /// Title to store; defaults to the file name.
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        tags: Option<String>,
    },

    /// Search stored chunks.
    Search {
        query: String,

        /// Maximum number of results (defaults to `retrieval.default_limit`).
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Answer a question from stored context.
    Ask {
        query: String,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// List stored documents, newest first.
    Docs {
        #[arg(long)]
        json: bool,
    },

    /// Show a document with its chunks.
    Get { id: String },

    /// Show database statistics.
    Stats,
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;
    init_tracing(&cfg);

    let vault = mindvault::open_vault(&cfg).await?;

    match cli.command {
        Commands::Init => {
            println!("Database initialized at {}", cfg.db.path.display());
        }
        Commands::Add {
            content,
            title,
            tags,
            path,
        } => {
            ingest::run_add(&vault, &title, &content, path, tags).await?;
        }
        Commands::AddFile { file, title, tags } => {
            ingest::run_add_file(&vault, &file, title, tags).await?;
        }
        Commands::Search { query, limit, json } => {
            search::run_search(&vault, &query, limit, json).await?;
        }
        Commands::Ask { query, limit } => {
            search::run_ask(&vault, &query, limit).await?;
        }
        Commands::Docs { json } => {
            documents::run_docs(&vault, json).await?;
        }
        Commands::Get { id } => {
            documents::run_get(&vault, &id).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg, &vault).await?;
        }
    }

    vault.store().pool().close().await;
    Ok(())
}
