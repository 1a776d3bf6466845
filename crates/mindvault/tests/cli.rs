//! End-to-end tests driving the `mindvault` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let files_dir = root.join("files");
    fs::create_dir_all(&files_dir).unwrap();
    fs::write(
        files_dir.join("rust.md"),
        "# Rust\n\nOwnership and borrowing keep memory safe without a garbage collector.",
    )
    .unwrap();
    fs::write(files_dir.join("slides.pdf"), "not text").unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/mindvault.sqlite"

[chunking]
window_words = 500
overlap_words = 50

[retrieval]
default_limit = 5
min_score = 0.1
"#,
        root.display()
    );
    let config_path = config_dir.join("mindvault.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_mindvault"))
        .arg("--config")
        .arg(config_path)
        .args(args)
        .output()
        .expect("failed to run mindvault binary");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run(&config, &["init"]);
    assert!(ok, "init failed: {} {}", stdout, stderr);
    assert!(stdout.contains("Database initialized"));
    let (_, _, ok) = run(&config, &["init"]);
    assert!(ok, "second init failed");
}

#[test]
fn test_add_search_and_duplicate() {
    let (_tmp, config) = setup_test_env();
    let content = "AI safety is important for long term planning";

    let (stdout, stderr, ok) = run(&config, &["add", "--title", "Notes", content]);
    assert!(ok, "add failed: {}", stderr);
    assert!(stdout.contains("Added 'Notes'"));

    let (stdout, _, ok) = run(&config, &["add", "--title", "Other", content]);
    assert!(ok, "duplicate add should not fail");
    assert!(stdout.contains("already exists"));

    let (stdout, stderr, ok) = run(&config, &["search", "AI safety", "--json"]);
    assert!(ok, "search failed: {}", stderr);
    let results: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let arr = results.as_array().unwrap();
    assert!(!arr.is_empty());
    assert_eq!(arr[0]["document_title"], "Notes");
    assert!(arr[0]["relevance_score"].as_f64().unwrap() > 0.1);

    let (stdout, _, ok) = run(&config, &["stats"]);
    assert!(ok);
    assert!(stdout.contains("Documents:   1"));
}

#[test]
fn test_search_empty_vault() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run(&config, &["search", "anything"]);
    assert!(ok, "search failed: {}", stderr);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_ask_prints_response_and_sources() {
    let (tmp, config) = setup_test_env();
    let file = tmp.path().join("files/rust.md");
    let (_, stderr, ok) = run(&config, &["add-file", file.to_str().unwrap()]);
    assert!(ok, "add-file failed: {}", stderr);

    let (stdout, _, ok) = run(&config, &["ask", "ownership borrowing"]);
    assert!(ok);
    assert!(stdout.contains("From 'rust.md':"));
    assert!(stdout.contains("--- Sources ---"));

    let (stdout, _, ok) = run(&config, &["ask", "quantum chromodynamics"]);
    assert!(ok);
    assert!(stdout.contains("couldn't find any relevant information"));
}

#[test]
fn test_add_file_rejects_unsupported_type() {
    let (tmp, config) = setup_test_env();
    let file = tmp.path().join("files/slides.pdf");
    let (_, stderr, ok) = run(&config, &["add-file", file.to_str().unwrap()]);
    assert!(!ok);
    assert!(stderr.contains("Unsupported file type"));
}

#[test]
fn test_docs_and_get() {
    let (_tmp, config) = setup_test_env();
    run(&config, &["add", "--title", "First", "--tags", "a, b", "first note body"]);
    run(&config, &["add", "--title", "Second", "second note body"]);

    let (stdout, _, ok) = run(&config, &["docs", "--json"]);
    assert!(ok);
    let docs: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let docs = docs.as_array().unwrap();
    assert_eq!(docs.len(), 2);
    let id = docs
        .iter()
        .find(|d| d["title"] == "First")
        .and_then(|d| d["id"].as_str())
        .unwrap()
        .to_string();

    let (stdout, _, ok) = run(&config, &["get", &id]);
    assert!(ok);
    assert!(stdout.contains("tags:        a, b"));
    assert!(stdout.contains("--- Chunks (1) ---"));

    let (_, stderr, ok) = run(&config, &["get", "no-such-id"]);
    assert!(!ok);
    assert!(stderr.contains("document not found"));
}
