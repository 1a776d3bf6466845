//! TF-IDF vector space built on demand over the chunk corpus plus a query.
//!
//! The query is treated as one more document when fitting the vocabulary,
//! so every returned vector lives in the same coordinate space. Nothing is
//! cached: each call reflects the corpus exactly as supplied.
//!
//! # Weighting
//!
//! 1. Lowercase the text; tokens are runs of alphanumeric or `_` characters
//!    at least two characters long. English stop-words are dropped.
//! 2. Keep the `max_features` terms with the highest total count across all
//!    texts (ties broken alphabetically).
//! 3. `weight = count × (ln((1 + n) / (1 + df)) + 1)` where `n` counts the
//!    query too.
//! 4. L2-normalize every vector.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use thiserror::Error;

pub const DEFAULT_MAX_FEATURES: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// Corpus and query together contain no informative term.
    #[error("empty vocabulary: texts contain only stop-words or no tokens")]
    EmptyVocabulary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorParams {
    /// Vocabulary cap; the most frequent terms are kept.
    pub max_features: usize,
}

impl Default for VectorParams {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

/// Sparse vector as `(term id, weight)` pairs sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    pub fn from_entries(mut entries: Vec<(u32, f64)>) -> Self {
        entries.sort_by_key(|(id, _)| *id);
        Self { entries }
    }

    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Vectors for one query against one corpus snapshot.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    /// Terms indexed by id, alphabetical.
    pub vocabulary: Vec<String>,
    pub query: SparseVector,
    /// One vector per corpus text, in input order.
    pub corpus: Vec<SparseVector>,
}

fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

/// Lowercased, stop-word filtered tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    let stops = stop_words();
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| t.chars().count() >= 2 && !stops.contains(t))
        .map(str::to_string)
        .collect()
}

/// Build query and corpus vectors in a shared TF-IDF space.
///
/// Callers must short-circuit an empty corpus; with no corpus the space
/// would be fitted on the query alone.
pub fn build_vectors<S: AsRef<str>>(
    corpus: &[S],
    query: &str,
    params: &VectorParams,
) -> Result<VectorSpace, IndexError> {
    let counts: Vec<HashMap<String, u32>> = corpus
        .iter()
        .map(|t| t.as_ref())
        .chain(std::iter::once(query))
        .map(|text| {
            let mut tf: HashMap<String, u32> = HashMap::new();
            for token in tokenize(text) {
                *tf.entry(token).or_insert(0) += 1;
            }
            tf
        })
        .collect();

    let mut totals: HashMap<&str, (u64, u32)> = HashMap::new();
    for tf in &counts {
        for (term, c) in tf {
            let e = totals.entry(term.as_str()).or_insert((0, 0));
            e.0 += u64::from(*c);
            e.1 += 1;
        }
    }

    let mut ranked: Vec<(&str, u64, u32)> =
        totals.into_iter().map(|(t, (tot, df))| (t, tot, df)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    ranked.truncate(params.max_features);
    if ranked.is_empty() {
        return Err(IndexError::EmptyVocabulary);
    }
    ranked.sort_by(|a, b| a.0.cmp(b.0));

    let n = counts.len() as f64;
    let mut term_ids: HashMap<&str, (u32, f64)> = HashMap::with_capacity(ranked.len());
    let mut vocabulary = Vec::with_capacity(ranked.len());
    for (id, (term, _, df)) in ranked.iter().enumerate() {
        let idf = ((1.0 + n) / (1.0 + f64::from(*df))).ln() + 1.0;
        term_ids.insert(*term, (id as u32, idf));
        vocabulary.push((*term).to_string());
    }

    let mut vectors: Vec<SparseVector> = counts
        .iter()
        .map(|tf| {
            let mut entries: Vec<(u32, f64)> = tf
                .iter()
                .filter_map(|(term, c)| {
                    term_ids
                        .get(term.as_str())
                        .map(|(id, idf)| (*id, f64::from(*c) * idf))
                })
                .collect();
            let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in entries.iter_mut() {
                    *w /= norm;
                }
            }
            SparseVector::from_entries(entries)
        })
        .collect();

    let query_vec = vectors.pop().unwrap_or_default();
    Ok(VectorSpace {
        vocabulary,
        query: query_vec,
        corpus: vectors,
    })
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
    "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
    "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
    "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
    "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
    "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
    "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
    "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];
