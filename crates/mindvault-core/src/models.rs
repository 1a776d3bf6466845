//! Core data models used throughout MindVault.
//!
//! These types represent the documents, chunks, listings, and search
//! results that flow through ingestion and retrieval.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Number of content characters shown in a [`DocumentSummary`] preview.
pub const PREVIEW_CHARS: usize = 100;

/// Caller-supplied input for a new document.
#[derive(Debug, Clone, Default)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    pub source_path: Option<String>,
    pub tags: Option<String>,
}

impl NewDocument {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }
}

/// A stored document. Never mutated after insertion.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    pub source_path: Option<String>,
    /// SHA-256 hex digest of `content`; unique across the store.
    pub fingerprint: String,
    /// Unix timestamp (seconds, UTC).
    pub created_at: i64,
    pub tags: Option<String>,
}

impl Document {
    /// Split the comma separated `tags` field into trimmed, non-empty tags.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Compute the content fingerprint used as the deduplication key.
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A window of a document's words, the unit of retrieval.
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    pub id: String,
    pub document_id: String,
    pub chunk_index: i64,
    pub text: String,
}

/// One row of the full corpus scan used to rebuild the vector space.
#[derive(Debug, Clone)]
pub struct ChunkWithMeta {
    pub chunk_text: String,
    pub doc_title: String,
    pub doc_created_at: i64,
    pub doc_id: String,
}

/// Listing entry for a document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub created_at: String,
    /// Content length in characters.
    pub content_length: i64,
    pub preview: String,
}

impl DocumentSummary {
    /// Build a summary from the first [`PREVIEW_CHARS`] characters of the
    /// content. `"..."` is appended only when the content is longer.
    pub fn from_parts(
        id: String,
        title: String,
        created_at: i64,
        content_length: i64,
        head: &str,
    ) -> Self {
        let mut preview: String = head.chars().take(PREVIEW_CHARS).collect();
        if content_length > PREVIEW_CHARS as i64 {
            preview.push_str("...");
        }
        Self {
            id,
            title,
            created_at: format_ts_iso(created_at),
            content_length,
            preview,
        }
    }
}

/// A document with its chunks in index order.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDetail {
    pub document: Document,
    pub chunks: Vec<Chunk>,
}

/// A ranked chunk projected with its document metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub chunk_text: String,
    pub document_title: String,
    /// ISO 8601 timestamp of the parent document.
    pub document_created_at: String,
    pub document_id: String,
    /// Cosine similarity in `[0.0, 1.0]`.
    pub relevance_score: f64,
}

/// Result of [`Vault::add_document`](crate::vault::Vault::add_document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added { id: String, chunk_count: usize },
    /// A document with identical content is already stored.
    AlreadyExists { id: String },
}

impl AddOutcome {
    pub fn id(&self) -> &str {
        match self {
            AddOutcome::Added { id, .. } | AddOutcome::AlreadyExists { id } => id,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub documents: i64,
    pub chunks: i64,
}

/// Format a Unix timestamp as ISO 8601.
pub fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}
