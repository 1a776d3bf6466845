//! Document listing (`docs`) and retrieval by id (`get`).

use anyhow::Result;

use mindvault_core::models::format_ts_iso;

use crate::SqliteVault;

pub async fn run_docs(vault: &SqliteVault, json: bool) -> Result<()> {
    let docs = vault.list_documents().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
        return Ok(());
    }

    if docs.is_empty() {
        println!("No documents yet. Add some content to get started.");
        return Ok(());
    }

    println!("{} documents in your knowledge base:", docs.len());
    println!();
    for doc in &docs {
        println!("{}", doc.title);
        println!("  id:     {}", doc.id);
        println!("  added:  {}", doc.created_at);
        println!("  length: {} chars", doc.content_length);
        println!("  {}", doc.preview);
        println!();
    }
    Ok(())
}

pub async fn run_get(vault: &SqliteVault, id: &str) -> Result<()> {
    let detail = vault.get_document(id).await?;
    let doc = &detail.document;

    println!("--- Document ---");
    println!("id:          {}", doc.id);
    println!("title:       {}", doc.title);
    if let Some(ref path) = doc.source_path {
        println!("source_path: {}", path);
    }
    let tags = doc.tag_list();
    if !tags.is_empty() {
        println!("tags:        {}", tags.join(", "));
    }
    println!("created_at:  {}", format_ts_iso(doc.created_at));
    println!("fingerprint: {}", doc.fingerprint);
    println!();

    println!("--- Content ---");
    println!("{}", doc.content);
    println!();

    println!("--- Chunks ({}) ---", detail.chunks.len());
    for chunk in &detail.chunks {
        println!("[chunk {}]", chunk.chunk_index);
        println!("{}", chunk.text);
        println!();
    }
    Ok(())
}
