//! Ingestion commands: `add` (inline or stdin text) and `add-file`.
//!
//! Duplicate content is reported on stdout and is not a failure.

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

use mindvault_core::models::{AddOutcome, NewDocument};

use crate::SqliteVault;

/// File extensions accepted by `add-file`.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md"];

/// Add text content. A content of `-` reads from stdin.
pub async fn run_add(
    vault: &SqliteVault,
    title: &str,
    content: &str,
    path: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let content = if content == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read content from stdin")?;
        buf
    } else {
        content.to_string()
    };

    let mut doc = NewDocument::new(title, content);
    if let Some(path) = path {
        doc = doc.with_source_path(path);
    }
    if let Some(tags) = tags {
        doc = doc.with_tags(tags);
    }

    let outcome = vault.add_document(doc).await?;
    report(title, &outcome);
    Ok(())
}

/// Add a `.txt` or `.md` file. The title defaults to the file name.
pub async fn run_add_file(
    vault: &SqliteVault,
    file: &Path,
    title: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let doc = read_document_file(file, title, tags)?;
    let title = doc.title.clone();
    let outcome = vault.add_document(doc).await?;
    report(&title, &outcome);
    Ok(())
}

/// Read a supported file into a [`NewDocument`].
pub fn read_document_file(
    file: &Path,
    title: Option<String>,
    tags: Option<String>,
) -> Result<NewDocument> {
    let ext = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        bail!(
            "Unsupported file type: {}. Supported: {}",
            file.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read UTF-8 text from {}", file.display()))?;

    let title = match title {
        Some(t) => t,
        None => file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string()),
    };

    let mut doc = NewDocument::new(title, content).with_source_path(file.display().to_string());
    if let Some(tags) = tags {
        doc = doc.with_tags(tags);
    }
    Ok(doc)
}

fn report(title: &str, outcome: &AddOutcome) {
    match outcome {
        AddOutcome::Added { id, chunk_count } => {
            println!("Added '{}' to your knowledge base", title);
            println!("  id:     {}", id);
            println!("  chunks: {}", chunk_count);
        }
        AddOutcome::AlreadyExists { id } => {
            println!("This content already exists in your knowledge base");
            println!("  id:     {}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_document_file_defaults_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ideas.md");
        std::fs::write(&path, "# Ideas\n\nBuild a note vault.").unwrap();
        let doc = read_document_file(&path, None, Some("notes".into())).unwrap();
        assert_eq!(doc.title, "ideas.md");
        assert_eq!(doc.tags.as_deref(), Some("notes"));
        assert_eq!(doc.source_path.as_deref(), Some(path.display().to_string().as_str()));
        assert!(doc.content.contains("note vault"));
    }

    #[test]
    fn test_read_document_file_rejects_other_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, "binary").unwrap();
        assert!(read_document_file(&path, None, None).is_err());
    }
}
