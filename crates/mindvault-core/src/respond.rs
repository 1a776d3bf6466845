//! Answer assembly from retrieved chunks.
//!
//! No generation happens here: the top results are stitched into a
//! context block with a short summary. A generative model can later
//! consume the same context.

use std::collections::BTreeSet;

use crate::models::SearchResult;

/// Number of results stitched into the context block.
pub const CONTEXT_RESULTS: usize = 3;

pub const NOTHING_FOUND: &str =
    "I couldn't find any relevant information in your knowledge base for that query.";

/// Format a textual answer for `query` from ranked `results`.
pub fn format_response(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NOTHING_FOUND.to_string();
    }

    let top = &results[..results.len().min(CONTEXT_RESULTS)];
    let context = top
        .iter()
        .map(|r| format!("From '{}': {}", r.document_title, r.chunk_text))
        .collect::<Vec<_>>()
        .join("\n\n");

    let titles: BTreeSet<&str> = top.iter().map(|r| r.document_title.as_str()).collect();
    let titles = titles.into_iter().collect::<Vec<_>>().join(", ");

    let mut out = String::new();
    out.push_str("Based on your personal knowledge base, here's what I found:\n\n");
    out.push_str("**Context from your documents:**\n");
    out.push_str(&context);
    out.push_str("\n\n**Summary:**\n");
    out.push_str(&format!(
        "I found {} relevant pieces of information related to your query \"{}\". \
         The most relevant content comes from: {}.",
        results.len(),
        query,
        titles
    ));
    out.push_str(
        "\n\n*Note: This is a context-only response. A local language model could \
         analyze this context to give a fuller answer.*",
    );
    out
}

/// Render the top results as a sources listing with scores and dates.
pub fn format_sources(results: &[SearchResult]) -> String {
    let mut out = String::new();
    for (i, r) in results.iter().take(CONTEXT_RESULTS).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "[{}] {} (relevance: {:.2})\n",
            i + 1,
            r.document_title,
            r.relevance_score
        ));
        out.push_str(&format!("    added: {}\n", r.document_created_at));
        out.push_str(&format!("    {}\n", r.chunk_text));
    }
    out
}
