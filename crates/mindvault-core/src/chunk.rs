//! Overlapping word-window chunker.
//!
//! Splits document text on whitespace and emits windows of up to
//! `window` words. Consecutive windows start `window - overlap` words
//! apart, so neighbouring chunks share `overlap` words of context.
//!
//! # Example
//!
//! ```rust
//! use mindvault_core::chunk::{chunk_text, ChunkPolicy};
//!
//! let policy = ChunkPolicy::new(4, 1).unwrap();
//! let chunks = chunk_text("a b c d e f g", &policy);
//! assert_eq!(chunks, vec!["a b c d", "d e f g", "g"]);
//! ```

use uuid::Uuid;

use crate::error::{Result, VaultError};
use crate::models::Chunk;

pub const DEFAULT_WINDOW_WORDS: usize = 500;
pub const DEFAULT_OVERLAP_WORDS: usize = 50;

/// Window size and overlap, both counted in words.
///
/// Construction guarantees `window > overlap`, so the stride between
/// window starts is always at least one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPolicy {
    window: usize,
    overlap: usize,
}

impl ChunkPolicy {
    pub fn new(window: usize, overlap: usize) -> Result<Self> {
        if window == 0 {
            return Err(VaultError::InvalidConfig(
                "chunk window must be at least one word".to_string(),
            ));
        }
        if overlap >= window {
            return Err(VaultError::InvalidConfig(format!(
                "chunk overlap ({}) must be smaller than the window ({})",
                overlap, window
            )));
        }
        Ok(Self { window, overlap })
    }

    pub fn step(&self) -> usize {
        self.window - self.overlap
    }

    /// Iterate over the windows of `text`.
    pub fn windows<'a>(&self, text: &'a str) -> Windows<'a> {
        Windows {
            words: text.split_whitespace().collect(),
            policy: *self,
            start: 0,
        }
    }
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW_WORDS,
            overlap: DEFAULT_OVERLAP_WORDS,
        }
    }
}

/// Iterator over the word windows of one text.
///
/// Cloning yields an independent iterator from the same position.
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    words: Vec<&'a str>,
    policy: ChunkPolicy,
    start: usize,
}

impl Iterator for Windows<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.start >= self.words.len() {
            return None;
        }
        let end = (self.start + self.policy.window).min(self.words.len());
        let window = self.words[self.start..end].join(" ");
        self.start += self.policy.step();
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.words.len().saturating_sub(self.start);
        let n = remaining.div_ceil(self.policy.step());
        (n, Some(n))
    }
}

impl ExactSizeIterator for Windows<'_> {}

/// Split `text` into ordered chunk strings. Empty text yields no chunks.
pub fn chunk_text(text: &str, policy: &ChunkPolicy) -> Vec<String> {
    policy.windows(text).collect()
}

/// Chunk `text` into [`Chunk`] records owned by `document_id`, with
/// contiguous indices starting at 0.
pub fn build_chunks(document_id: &str, text: &str, policy: &ChunkPolicy) -> Vec<Chunk> {
    policy
        .windows(text)
        .enumerate()
        .map(|(i, window)| Chunk {
            id: Uuid::new_v4().to_string(),
            document_id: document_id.to_string(),
            chunk_index: i as i64,
            text: window,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_rejects_overlap_not_smaller_than_window() {
        assert!(ChunkPolicy::new(50, 50).is_err());
        assert!(ChunkPolicy::new(10, 60).is_err());
        assert!(ChunkPolicy::new(0, 0).is_err());
        assert!(ChunkPolicy::new(1, 0).is_ok());
    }

    #[test]
    fn test_empty_text() {
        let policy = ChunkPolicy::default();
        assert!(chunk_text("", &policy).is_empty());
        assert!(chunk_text("   \n\t ", &policy).is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_text("Hello,   world!\n\nAgain", &ChunkPolicy::default());
        assert_eq!(chunks, vec!["Hello, world! Again"]);
    }

    #[test]
    fn test_1200_words_default_policy() {
        let text = numbered_words(1200);
        let chunks = chunk_text(&text, &ChunkPolicy::default());
        assert_eq!(chunks.len(), 3);
        let lens: Vec<usize> = chunks.iter().map(|c| c.split(' ').count()).collect();
        assert_eq!(lens, vec![500, 500, 300]);
        assert!(chunks[1].starts_with("w450 "));
        assert!(chunks[2].starts_with("w900 "));
        assert!(chunks[2].ends_with("w1199"));
    }

    #[test]
    fn test_deterministic() {
        let text = numbered_words(1200);
        let policy = ChunkPolicy::default();
        assert_eq!(chunk_text(&text, &policy), chunk_text(&text, &policy));
    }

    #[test]
    fn test_windows_restartable() {
        let text = numbered_words(30);
        let policy = ChunkPolicy::new(10, 3).unwrap();
        let mut it = policy.windows(&text);
        it.next();
        let rest_a: Vec<String> = it.clone().collect();
        let rest_b: Vec<String> = it.collect();
        assert_eq!(rest_a, rest_b);
    }

    #[test]
    fn test_size_hint_matches_count() {
        let policy = ChunkPolicy::new(7, 2).unwrap();
        for n in [0, 1, 5, 7, 8, 23, 100] {
            let text = numbered_words(n);
            let it = policy.windows(&text);
            assert_eq!(it.len(), it.clone().count(), "n = {}", n);
        }
    }

    #[test]
    fn test_coverage_every_word_appears() {
        let text = numbered_words(1037);
        let policy = ChunkPolicy::new(100, 17).unwrap();
        let chunks = chunk_text(&text, &policy);
        let mut seen = vec![false; 1037];
        for c in &chunks {
            for w in c.split(' ') {
                let idx: usize = w[1..].parse().unwrap();
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_build_chunks_indices_contiguous() {
        let text = numbered_words(95);
        let chunks = build_chunks("doc1", &text, &ChunkPolicy::new(20, 5).unwrap());
        assert_eq!(chunks.len(), 7);
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.chunk_index, i as i64);
            assert_eq!(c.document_id, "doc1");
        }
    }
}
