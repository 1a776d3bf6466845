//! Retrieval commands: `search` prints ranked chunks, `ask` prints the
//! stitched response followed by its sources.

use anyhow::Result;

use mindvault_core::respond::{format_response, format_sources};

use crate::SqliteVault;

/// Snippet length used in the plain-text search listing.
const SNIPPET_CHARS: usize = 240;

pub async fn run_search(
    vault: &SqliteVault,
    query: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let results = vault.search(query, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, r) in results.iter().enumerate() {
        println!(
            "{}. [{:.2}] {} ({})",
            i + 1,
            r.relevance_score,
            r.document_title,
            r.document_created_at
        );
        println!("    id: {}", r.document_id);
        let snippet: String = r.chunk_text.chars().take(SNIPPET_CHARS).collect();
        if snippet.len() < r.chunk_text.len() {
            println!("    {}...", snippet);
        } else {
            println!("    {}", snippet);
        }
        println!();
    }

    Ok(())
}

pub async fn run_ask(vault: &SqliteVault, query: &str, limit: Option<usize>) -> Result<()> {
    let results = vault.search(query, limit).await?;

    println!("--- Response ---");
    println!("{}", format_response(query, &results));

    if !results.is_empty() {
        println!();
        println!("--- Sources ---");
        print!("{}", format_sources(&results));
    }

    Ok(())
}
