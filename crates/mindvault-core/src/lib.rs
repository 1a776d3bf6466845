//! # MindVault Core
//!
//! Storage-agnostic logic for MindVault: data models, the word-window
//! chunker, the TF-IDF vector space, cosine ranking, response stitching,
//! the [`store::Store`] abstraction and the [`vault::Vault`] service that
//! ties them together.
//!
//! This crate contains no tokio, sqlx, or filesystem I/O. The SQLite
//! backend and the CLI live in the `mindvault` app crate.

pub mod chunk;
pub mod error;
pub mod models;
pub mod rank;
pub mod respond;
pub mod store;
pub mod vault;
pub mod vector;

pub use error::{Result, VaultError};
pub use vault::{RetrievalParams, Vault};
