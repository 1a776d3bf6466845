//! In-memory [`Store`] implementation for tests and embedding.
//!
//! Documents and chunks live in `Vec`s behind a single `RwLock`, so an
//! insert either lands completely or not at all.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::{Result, VaultError};
use crate::models::{
    Chunk, ChunkWithMeta, Document, DocumentDetail, DocumentSummary, StoreCounts, PREVIEW_CHARS,
};

use super::{InsertOutcome, Store};

#[derive(Default)]
struct Inner {
    docs: Vec<Document>,
    chunks: Vec<Chunk>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| VaultError::Storage(format!("store lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| VaultError::Storage(format!("store lock poisoned: {}", e)))
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn insert_document(&self, doc: &Document, chunks: &[Chunk]) -> Result<InsertOutcome> {
        let mut inner = self.write()?;
        if inner.docs.iter().any(|d| d.fingerprint == doc.fingerprint) {
            return Ok(InsertOutcome::DuplicateFingerprint);
        }
        if inner.docs.iter().any(|d| d.id == doc.id) {
            return Err(VaultError::IntegrityViolation(format!(
                "duplicate document id {}",
                doc.id
            )));
        }

        let mut seen = HashSet::new();
        for c in chunks {
            if c.document_id != doc.id {
                return Err(VaultError::IntegrityViolation(format!(
                    "chunk {} does not belong to document {}",
                    c.id, doc.id
                )));
            }
            if !seen.insert(c.chunk_index) {
                return Err(VaultError::IntegrityViolation(format!(
                    "duplicate chunk index {} for document {}",
                    c.chunk_index, doc.id
                )));
            }
        }

        inner.docs.push(doc.clone());
        inner.chunks.extend_from_slice(chunks);
        Ok(InsertOutcome::Inserted)
    }

    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<String>> {
        let inner = self.read()?;
        Ok(inner
            .docs
            .iter()
            .find(|d| d.fingerprint == fingerprint)
            .map(|d| d.id.clone()))
    }

    async fn list_chunks_with_meta(&self) -> Result<Vec<ChunkWithMeta>> {
        let inner = self.read()?;
        let mut out = Vec::with_capacity(inner.chunks.len());
        for doc in &inner.docs {
            let mut chunks: Vec<&Chunk> =
                inner.chunks.iter().filter(|c| c.document_id == doc.id).collect();
            chunks.sort_by_key(|c| c.chunk_index);
            out.extend(chunks.into_iter().map(|c| ChunkWithMeta {
                chunk_text: c.text.clone(),
                doc_title: doc.title.clone(),
                doc_created_at: doc.created_at,
                doc_id: doc.id.clone(),
            }));
        }
        Ok(out)
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        let inner = self.read()?;
        let mut docs: Vec<&Document> = inner.docs.iter().rev().collect();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs
            .into_iter()
            .map(|d| {
                let head: String = d.content.chars().take(PREVIEW_CHARS).collect();
                DocumentSummary::from_parts(
                    d.id.clone(),
                    d.title.clone(),
                    d.created_at,
                    d.content.chars().count() as i64,
                    &head,
                )
            })
            .collect())
    }

    async fn get_document(&self, id: &str) -> Result<Option<DocumentDetail>> {
        let inner = self.read()?;
        let Some(doc) = inner.docs.iter().find(|d| d.id == id) else {
            return Ok(None);
        };
        let mut chunks: Vec<Chunk> = inner
            .chunks
            .iter()
            .filter(|c| c.document_id == id)
            .cloned()
            .collect();
        chunks.sort_by_key(|c| c.chunk_index);
        Ok(Some(DocumentDetail {
            document: doc.clone(),
            chunks,
        }))
    }

    async fn counts(&self) -> Result<StoreCounts> {
        let inner = self.read()?;
        Ok(StoreCounts {
            documents: inner.docs.len() as i64,
            chunks: inner.chunks.len() as i64,
        })
    }
}
