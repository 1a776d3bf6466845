//! Error kinds surfaced to callers of the vault.
//!
//! Duplicate ingestion is deliberately absent: it is reported as
//! [`AddOutcome::AlreadyExists`](crate::models::AddOutcome::AlreadyExists).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Debug, Error)]
pub enum VaultError {
    /// The backing store failed (I/O, connection, SQL error).
    #[error("storage error: {0}")]
    Storage(String),

    /// A storage constraint other than fingerprint uniqueness was violated.
    #[error("integrity violation: {0}")]
    IntegrityViolation(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The document was rejected before reaching the store.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("document not found: {0}")]
    NotFound(String),
}
