//! TOML configuration.
//!
//! ```toml
//! [db]
//! path = "./data/mindvault.sqlite"
//!
//! [chunking]
//! window_words = 500
//! overlap_words = 50
//!
//! [retrieval]
//! default_limit = 5
//! min_score = 0.1
//! max_features = 1000
//!
//! [logging]
//! level = "warn"
//! json = false
//! ```
//!
//! Only `[db]` is required. `RUST_LOG` overrides `logging.level`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use mindvault_core::chunk::{DEFAULT_OVERLAP_WORDS, DEFAULT_WINDOW_WORDS};
use mindvault_core::rank::DEFAULT_MIN_SCORE;
use mindvault_core::vault::DEFAULT_LIMIT;
use mindvault_core::vector::DEFAULT_MAX_FEATURES;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_window_words")]
    pub window_words: usize,
    #[serde(default = "default_overlap_words")]
    pub overlap_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            window_words: DEFAULT_WINDOW_WORDS,
            overlap_words: DEFAULT_OVERLAP_WORDS,
        }
    }
}

fn default_window_words() -> usize {
    DEFAULT_WINDOW_WORDS
}
fn default_overlap_words() -> usize {
    DEFAULT_OVERLAP_WORDS
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            min_score: DEFAULT_MIN_SCORE,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}
fn default_min_score() -> f64 {
    DEFAULT_MIN_SCORE
}
fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Parse and validate a configuration document.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.chunking.window_words == 0 {
        bail!("chunking.window_words must be > 0");
    }
    if config.chunking.overlap_words >= config.chunking.window_words {
        bail!("chunking.overlap_words must be smaller than chunking.window_words");
    }

    if config.retrieval.default_limit < 1 {
        bail!("retrieval.default_limit must be >= 1");
    }
    if !(0.0..1.0).contains(&config.retrieval.min_score) {
        bail!("retrieval.min_score must be in [0.0, 1.0)");
    }
    if config.retrieval.max_features < 1 {
        bail!("retrieval.max_features must be >= 1");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = parse_config("[db]\npath = \"vault.sqlite\"\n").unwrap();
        assert_eq!(config.chunking.window_words, 500);
        assert_eq!(config.chunking.overlap_words, 50);
        assert_eq!(config.retrieval.default_limit, 5);
        assert!((config.retrieval.min_score - 0.1).abs() < 1e-12);
        assert_eq!(config.retrieval.max_features, 1000);
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_overlap_must_be_smaller_than_window() {
        let err = parse_config(
            "[db]\npath = \"v.sqlite\"\n[chunking]\nwindow_words = 50\noverlap_words = 50\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("overlap_words"));
    }

    #[test]
    fn test_min_score_range() {
        assert!(parse_config("[db]\npath = \"v\"\n[retrieval]\nmin_score = 1.0\n").is_err());
        assert!(parse_config("[db]\npath = \"v\"\n[retrieval]\nmin_score = -0.5\n").is_err());
        assert!(parse_config("[db]\npath = \"v\"\n[retrieval]\nmin_score = 0.0\n").is_ok());
    }

    #[test]
    fn test_missing_db_section() {
        assert!(parse_config("[chunking]\nwindow_words = 10\n").is_err());
    }
}
