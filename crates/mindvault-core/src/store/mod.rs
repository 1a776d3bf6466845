//! Storage abstraction for MindVault.
//!
//! The [`Store`] trait covers everything the vault needs from a record
//! store: atomic ingestion of a document with its chunks, fingerprint
//! lookup, the full chunk scan used to rebuild the vector space, and
//! listings.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Chunk, ChunkWithMeta, Document, DocumentDetail, DocumentSummary, StoreCounts};

/// Result of [`Store::insert_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Another document already holds this fingerprint; nothing was written.
    DuplicateFingerprint,
}

/// Abstract record store.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`insert_document`](Store::insert_document) | Insert a document and its chunks atomically |
/// | [`find_by_fingerprint`](Store::find_by_fingerprint) | Look up a document id by content fingerprint |
/// | [`list_chunks_with_meta`](Store::list_chunks_with_meta) | Full chunk scan with document metadata |
/// | [`list_documents`](Store::list_documents) | Document summaries, newest first |
/// | [`get_document`](Store::get_document) | One document with ordered chunks |
/// | [`counts`](Store::counts) | Document and chunk totals |
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert `doc` and all of `chunks` as one unit.
    ///
    /// Fingerprint uniqueness must be enforced by the store itself. On any
    /// error nothing from this call may remain visible.
    async fn insert_document(&self, doc: &Document, chunks: &[Chunk]) -> Result<InsertOutcome>;

    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<String>>;

    /// Every chunk joined with its document, in document insertion order
    /// then chunk index.
    async fn list_chunks_with_meta(&self) -> Result<Vec<ChunkWithMeta>>;

    /// Ordered by `created_at` descending; equal timestamps list the most
    /// recently inserted document first.
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>>;

    async fn get_document(&self, id: &str) -> Result<Option<DocumentDetail>>;

    async fn counts(&self) -> Result<StoreCounts>;
}
