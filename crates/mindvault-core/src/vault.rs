//! The vault service: ingestion and retrieval over a [`Store`].
//!
//! A [`Vault`] is built once by the caller and handed by reference to
//! each request path. It owns the store and the chunking/retrieval
//! parameters; there is no global state.
//!
//! # Search
//!
//! 1. Load every chunk with its document metadata.
//! 2. Empty corpus: return no results.
//! 3. Build a TF-IDF space over the chunks plus the query.
//! 4. Rank by cosine similarity, truncate to `limit`, drop scores
//!    `<= min_score`.
//! 5. Project the survivors into [`SearchResult`]s.

use tracing::{debug, info};
use uuid::Uuid;

use crate::chunk::{build_chunks, ChunkPolicy};
use crate::error::{Result, VaultError};
use crate::models::{
    fingerprint, format_ts_iso, AddOutcome, Document, DocumentDetail, DocumentSummary,
    NewDocument, SearchResult, StoreCounts,
};
use crate::rank::{rank, DEFAULT_MIN_SCORE};
use crate::store::{InsertOutcome, Store};
use crate::vector::{build_vectors, VectorParams, DEFAULT_MAX_FEATURES};

pub const DEFAULT_LIMIT: usize = 5;

/// Retrieval tuning parameters, decoupled from application config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalParams {
    /// Results returned when the caller gives no limit.
    pub default_limit: usize,
    /// Scores must be strictly greater than this to be returned.
    pub min_score: f64,
    pub max_features: usize,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            min_score: DEFAULT_MIN_SCORE,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

pub struct Vault<S: Store> {
    store: S,
    chunking: ChunkPolicy,
    retrieval: RetrievalParams,
}

impl<S: Store> Vault<S> {
    pub fn new(store: S, chunking: ChunkPolicy, retrieval: RetrievalParams) -> Self {
        Self {
            store,
            chunking,
            retrieval,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ingest a document, or report the existing one with identical content.
    pub async fn add_document(&self, input: NewDocument) -> Result<AddOutcome> {
        if input.title.trim().is_empty() {
            return Err(VaultError::InvalidDocument("title is empty".to_string()));
        }
        if input.content.trim().is_empty() {
            return Err(VaultError::InvalidDocument("content is empty".to_string()));
        }

        let doc = Document {
            id: Uuid::new_v4().to_string(),
            fingerprint: fingerprint(&input.content),
            created_at: chrono::Utc::now().timestamp(),
            title: input.title,
            content: input.content,
            source_path: input.source_path,
            tags: input.tags,
        };
        let chunks = build_chunks(&doc.id, &doc.content, &self.chunking);

        match self.store.insert_document(&doc, &chunks).await? {
            InsertOutcome::Inserted => {
                info!(id = %doc.id, title = %doc.title, chunks = chunks.len(), "document added");
                Ok(AddOutcome::Added {
                    id: doc.id,
                    chunk_count: chunks.len(),
                })
            }
            InsertOutcome::DuplicateFingerprint => {
                let id = self
                    .store
                    .find_by_fingerprint(&doc.fingerprint)
                    .await?
                    .ok_or_else(|| {
                        VaultError::IntegrityViolation(format!(
                            "fingerprint {} reported as duplicate but not found",
                            doc.fingerprint
                        ))
                    })?;
                debug!(existing = %id, "document already exists");
                Ok(AddOutcome::AlreadyExists { id })
            }
        }
    }

    /// Rank chunks against `query` and return at most `limit` results.
    /// `None` uses the configured `default_limit`.
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<SearchResult>> {
        let limit = limit.unwrap_or(self.retrieval.default_limit);
        if query.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let rows = self.store.list_chunks_with_meta().await?;
        if rows.is_empty() {
            debug!("empty corpus, skipping index build");
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = rows.iter().map(|r| r.chunk_text.as_str()).collect();
        let params = VectorParams {
            max_features: self.retrieval.max_features,
        };
        let space = match build_vectors(&texts, query, &params) {
            Ok(space) => space,
            Err(e) => {
                debug!(error = %e, "no informative signal for query");
                return Ok(Vec::new());
            }
        };

        let ranked = rank(&space.query, &space.corpus, limit, self.retrieval.min_score);
        debug!(
            corpus = rows.len(),
            vocabulary = space.vocabulary.len(),
            hits = ranked.len(),
            "search complete"
        );

        Ok(ranked
            .into_iter()
            .map(|r| {
                let row = &rows[r.index];
                SearchResult {
                    chunk_text: row.chunk_text.clone(),
                    document_title: row.doc_title.clone(),
                    document_created_at: format_ts_iso(row.doc_created_at),
                    document_id: row.doc_id.clone(),
                    relevance_score: r.score,
                }
            })
            .collect())
    }

    pub async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        self.store.list_documents().await
    }

    pub async fn get_document(&self, id: &str) -> Result<DocumentDetail> {
        self.store
            .get_document(id)
            .await?
            .ok_or_else(|| VaultError::NotFound(id.to_string()))
    }

    pub async fn stats(&self) -> Result<StoreCounts> {
        self.store.counts().await
    }
}
