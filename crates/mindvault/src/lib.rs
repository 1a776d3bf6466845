//! # MindVault
//!
//! **A local-first personal note store with lexical retrieval.**
//!
//! Notes are split into overlapping word windows and stored in SQLite.
//! Queries rebuild a TF-IDF space over every stored chunk, rank chunks by
//! cosine similarity, and stitch the best matches into a context answer.
//!
//! ## Data Flow
//!
//! ```text
//! add/add-file ──▶ Vault ──▶ chunk ──▶ SqliteStore (documents + chunks)
//! search/ask   ──▶ Vault ──▶ full chunk scan ──▶ TF-IDF ──▶ rank ──▶ respond
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`db`] | SQLite connection pool with WAL mode |
//! | [`migrate`] | Idempotent schema creation |
//! | [`sqlite_store`] | SQLite implementation of the core `Store` trait |
//! | [`ingest`] | `add` and `add-file` commands |
//! | [`search`] | `search` and `ask` commands |
//! | [`documents`] | `docs` and `get` commands |
//! | [`stats`] | `stats` command |

pub mod config;
pub mod db;
pub mod documents;
pub mod ingest;
pub mod migrate;
pub mod search;
pub mod sqlite_store;
pub mod stats;

pub use mindvault_core::{chunk, models, rank, respond, store, vector};

use anyhow::Result;
use mindvault_core::chunk::ChunkPolicy;
use mindvault_core::{RetrievalParams, Vault};

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// The vault type used by every CLI command.
pub type SqliteVault = Vault<SqliteStore>;

/// Connect to the configured database, ensure the schema exists, and
/// build the vault service.
pub async fn open_vault(config: &Config) -> Result<SqliteVault> {
    let pool = db::connect(config).await?;
    migrate::run_migrations(&pool).await?;
    let chunking = ChunkPolicy::new(config.chunking.window_words, config.chunking.overlap_words)?;
    let retrieval = RetrievalParams {
        default_limit: config.retrieval.default_limit,
        min_score: config.retrieval.min_score,
        max_features: config.retrieval.max_features,
    };
    Ok(Vault::new(SqliteStore::new(pool), chunking, retrieval))
}
