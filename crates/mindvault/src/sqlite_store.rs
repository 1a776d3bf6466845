//! SQLite-backed [`Store`] implementation.
//!
//! Ingestion runs in one transaction. The document row is written with
//! `ON CONFLICT(fingerprint) DO NOTHING`, so duplicate detection is done by
//! the UNIQUE constraint rather than a separate lookup. Returning early
//! drops the transaction, which rolls it back.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use mindvault_core::error::{Result, VaultError};
use mindvault_core::models::{
    Chunk, ChunkWithMeta, Document, DocumentDetail, DocumentSummary, StoreCounts, PREVIEW_CHARS,
};
use mindvault_core::store::{InsertOutcome, Store};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Map a sqlx error onto the vault's error kinds.
fn storage_err(e: sqlx::Error) -> VaultError {
    match &e {
        sqlx::Error::Database(db)
            if db.is_unique_violation()
                || db.is_foreign_key_violation()
                || db.is_check_violation() =>
        {
            VaultError::IntegrityViolation(db.message().to_string())
        }
        _ => VaultError::Storage(e.to_string()),
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert_document(&self, doc: &Document, chunks: &[Chunk]) -> Result<InsertOutcome> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO documents (id, title, content, source_path, fingerprint, created_at, tags)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(fingerprint) DO NOTHING
            "#,
        )
        .bind(&doc.id)
        .bind(&doc.title)
        .bind(&doc.content)
        .bind(&doc.source_path)
        .bind(&doc.fingerprint)
        .bind(doc.created_at)
        .bind(&doc.tags)
        .execute(&mut *tx)
        .await
        .map_err(storage_err)?
        .rows_affected();

        if inserted == 0 {
            return Ok(InsertOutcome::DuplicateFingerprint);
        }

        for chunk in chunks {
            sqlx::query(
                "INSERT INTO chunks (id, document_id, chunk_index, text) VALUES (?, ?, ?, ?)",
            )
            .bind(&chunk.id)
            .bind(&chunk.document_id)
            .bind(chunk.chunk_index)
            .bind(&chunk.text)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;
        }

        tx.commit().await.map_err(storage_err)?;
        Ok(InsertOutcome::Inserted)
    }

    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<String>> {
        sqlx::query_scalar("SELECT id FROM documents WHERE fingerprint = ?")
            .bind(fingerprint)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)
    }

    async fn list_chunks_with_meta(&self) -> Result<Vec<ChunkWithMeta>> {
        let rows = sqlx::query(
            r#"
            SELECT c.text, d.title, d.created_at, d.id
            FROM chunks c
            JOIN documents d ON c.document_id = d.id
            ORDER BY d.rowid ASC, c.chunk_index ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows
            .iter()
            .map(|row| ChunkWithMeta {
                chunk_text: row.get("text"),
                doc_title: row.get("title"),
                doc_created_at: row.get("created_at"),
                doc_id: row.get("id"),
            })
            .collect())
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, created_at,
                   LENGTH(content) AS content_length,
                   SUBSTR(content, 1, ?) AS head
            FROM documents
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(PREVIEW_CHARS as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows
            .iter()
            .map(|row| {
                let head: String = row.get("head");
                DocumentSummary::from_parts(
                    row.get("id"),
                    row.get("title"),
                    row.get("created_at"),
                    row.get("content_length"),
                    &head,
                )
            })
            .collect())
    }

    async fn get_document(&self, id: &str) -> Result<Option<DocumentDetail>> {
        let doc_row = sqlx::query(
            "SELECT id, title, content, source_path, fingerprint, created_at, tags FROM documents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        let Some(doc_row) = doc_row else {
            return Ok(None);
        };

        let chunk_rows = sqlx::query(
            "SELECT id, document_id, chunk_index, text FROM chunks WHERE document_id = ? ORDER BY chunk_index ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        let chunks = chunk_rows
            .iter()
            .map(|row| Chunk {
                id: row.get("id"),
                document_id: row.get("document_id"),
                chunk_index: row.get("chunk_index"),
                text: row.get("text"),
            })
            .collect();

        Ok(Some(DocumentDetail {
            document: Document {
                id: doc_row.get("id"),
                title: doc_row.get("title"),
                content: doc_row.get("content"),
                source_path: doc_row.get("source_path"),
                fingerprint: doc_row.get("fingerprint"),
                created_at: doc_row.get("created_at"),
                tags: doc_row.get("tags"),
            },
            chunks,
        }))
    }

    async fn counts(&self) -> Result<StoreCounts> {
        let documents: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err)?;
        let chunks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chunks")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(StoreCounts { documents, chunks })
    }
}
