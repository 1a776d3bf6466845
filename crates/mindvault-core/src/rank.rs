//! Cosine ranking with a relevance cutoff.
//!
//! Candidates are sorted by score (stable, so ties keep corpus order),
//! truncated to `limit`, and only then filtered by `min_score`. A strong
//! match outside the top `limit` is never promoted by the filter.

use crate::vector::SparseVector;

pub const DEFAULT_MIN_SCORE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    /// Position in the corpus slice passed to [`rank`].
    pub index: usize,
    pub score: f64,
}

/// Cosine similarity of two sparse vectors, clamped to `[0.0, 1.0]`.
///
/// Returns `0.0` if either vector has zero length.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < f64::EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Score every corpus vector against `query`, keep the best `limit`, then
/// drop scores `<= min_score`.
///
/// The survivors of the cutoff are always a prefix of the sorted list, so
/// truncating before filtering returns the same results as the reverse.
pub fn rank(
    query: &SparseVector,
    corpus: &[SparseVector],
    limit: usize,
    min_score: f64,
) -> Vec<Ranked> {
    let mut scored: Vec<Ranked> = corpus
        .iter()
        .enumerate()
        .map(|(index, v)| Ranked {
            index,
            score: cosine_similarity(query, v),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(limit);
    scored.retain(|r| r.score > min_score);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(entries: &[(u32, f64)]) -> SparseVector {
        SparseVector::from_entries(entries.to_vec())
    }

    #[test]
    fn test_empty_corpus() {
        assert!(rank(&v(&[(0, 1.0)]), &[], 5, DEFAULT_MIN_SCORE).is_empty());
    }

    #[test]
    fn test_cosine_identical_and_orthogonal() {
        let a = v(&[(0, 3.0), (1, 4.0)]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&a, &v(&[(2, 1.0)])), 0.0);
        assert_eq!(cosine_similarity(&a, &SparseVector::default()), 0.0);
    }

    #[test]
    fn test_order_descending_and_ties_stable() {
        let q = v(&[(0, 1.0)]);
        let corpus = vec![
            v(&[(0, 1.0), (1, 1.0)]),
            v(&[(0, 1.0)]),
            v(&[(0, 1.0), (1, 1.0)]),
            v(&[(1, 1.0)]),
        ];
        let out = rank(&q, &corpus, 10, 0.0);
        let idx: Vec<usize> = out.iter().map(|r| r.index).collect();
        assert_eq!(idx, vec![1, 0, 2]);
        for pair in out.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_bound_and_cutoff() {
        let q = v(&[(0, 1.0)]);
        let corpus: Vec<SparseVector> = (1..=20)
            .map(|i| v(&[(0, 1.0), (1, f64::from(i))]))
            .collect();
        let out = rank(&q, &corpus, 5, 0.1);
        assert!(out.len() <= 5);
        assert!(out.iter().all(|r| r.score > 0.1));
    }

    #[test]
    fn test_weak_shortlist_returns_fewer_than_limit() {
        let q = v(&[(0, 1.0)]);
        // scores: 1.0, ~0.05, ~0.05
        let corpus = vec![
            v(&[(0, 1.0)]),
            v(&[(0, 1.0), (1, 20.0)]),
            v(&[(0, 1.0), (1, 20.0)]),
        ];
        let out = rank(&q, &corpus, 2, 0.1);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].index, 0);
    }
}
