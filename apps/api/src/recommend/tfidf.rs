//! TF-IDF bag-of-words model over job titles.
//!
//! Tokens are lowercase runs of two or more word characters, minus stop words.
//! The vocabulary is indexed in lexicographic order and each term is weighted by
//! `count × (ln((1 + n) / (1 + df)) + 1)`; every vector is then L2-normalized.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::recommend::stop_words::is_stop_word;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

// ────────────────────────────────────────────────────────────────────────────
// Sparse vectors
// ────────────────────────────────────────────────────────────────────────────

/// Term-weight vector in the model's vocabulary space.
/// Only non-zero weights are stored, sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<usize, f64>, idf: &[f64]) -> Self {
        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(term, count)| (term, count * idf[term]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }
        Self { entries }
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn weight(&self, term: usize) -> f64 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; `0.0` when either side is the zero vector.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Model
// ────────────────────────────────────────────────────────────────────────────

/// Lowercases `text` and returns its non-stop-word tokens in order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Vocabulary and IDF weights fitted once over a document set.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfModel {
    /// Fits the model on `documents` and returns it with one vector per document,
    /// in input order.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVector>) {
        let tokenized: Vec<Vec<String>> =
            documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let terms: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let distinct: BTreeSet<usize> = tokens.iter().map(|t| vocabulary[t]).collect();
            for term in distinct {
                df[term] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let model = Self { vocabulary, idf };
        let vectors = tokenized
            .iter()
            .map(|tokens| model.vectorize_tokens(tokens))
            .collect();
        (model, vectors)
    }

    /// Maps free text into the fitted space. Unknown terms are ignored.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        self.vectorize_tokens(&tokenize(text))
    }

    fn vectorize_tokens(&self, tokens: &[String]) -> SparseVector {
        let mut counts = BTreeMap::new();
        for token in tokens {
            if let Some(&term) = self.vocabulary.get(token) {
                *counts.entry(term).or_insert(0.0) += 1.0;
            }
        }
        SparseVector::from_counts(counts, &self.idf)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
impl TfidfModel {
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|i| self.idf[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_tokenize_drops_stop_words_and_single_chars() {
        assert_eq!(
            tokenize("Head of Data & AI, Level 3"),
            vec!["head", "data", "ai", "level"]
        );
    }

    #[test]
    fn test_tokenize_lowercases() {
        assert_eq!(tokenize("INTJ 40 50000"), vec!["intj", "40", "50000"]);
    }

    #[test]
    fn test_vocabulary_is_lexicographic() {
        let (model, _) = TfidfModel::fit(&["Data Scientist", "Data Analyst"]);
        assert_eq!(model.vocabulary_size(), 3);
        assert_eq!(model.term_index("analyst"), Some(0));
        assert_eq!(model.term_index("data"), Some(1));
        assert_eq!(model.term_index("scientist"), Some(2));
        assert_eq!(model.term_index("the"), None);
    }

    #[test]
    fn test_idf_uses_smoothed_formula() {
        let (model, _) = TfidfModel::fit(&["Data Scientist", "Data Analyst", "Nurse"]);
        let n = 3.0_f64;
        let shared = ((1.0 + n) / (1.0 + 2.0)).ln() + 1.0;
        let rare = ((1.0 + n) / (1.0 + 1.0)).ln() + 1.0;
        assert!((model.idf("data").unwrap() - shared).abs() < EPS);
        assert!((model.idf("nurse").unwrap() - rare).abs() < EPS);
    }

    #[test]
    fn test_document_vectors_are_unit_length() {
        let (_, vectors) = TfidfModel::fit(&["Data Scientist", "Senior Data Engineer"]);
        for v in &vectors {
            assert!((v.norm() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_repeated_term_weighs_by_count() {
        let (model, vectors) = TfidfModel::fit(&["Data Data Analyst", "Nurse"]);
        let data = model.term_index("data").unwrap();
        let analyst = model.term_index("analyst").unwrap();
        // Same idf, so the weight ratio is the raw count ratio.
        let ratio = vectors[0].weight(data) / vectors[0].weight(analyst);
        assert!((ratio - 2.0).abs() < EPS);
    }

    #[test]
    fn test_unknown_terms_are_ignored() {
        let (model, _) = TfidfModel::fit(&["Data Scientist"]);
        assert!(model.vectorize("INTJ 3 40 50000").is_zero());
        let v = model.vectorize("astronaut data");
        assert!(!v.is_zero());
        assert!((v.weight(model.term_index("data").unwrap()) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_cosine_similarity() {
        let (model, vectors) = TfidfModel::fit(&["Data Scientist", "Data Analyst", "Nurse"]);
        let query = model.vectorize("data scientist");
        assert!((query.cosine(&vectors[0]) - 1.0).abs() < EPS);
        let partial = query.cosine(&vectors[1]);
        assert!(partial > 0.0 && partial < 1.0);
        assert_eq!(query.cosine(&vectors[2]), 0.0);
    }

    #[test]
    fn test_cosine_with_zero_vector_is_zero() {
        let (_, vectors) = TfidfModel::fit(&["Data Scientist"]);
        assert_eq!(SparseVector::default().cosine(&vectors[0]), 0.0);
    }

    #[test]
    fn test_stop_word_only_title_has_zero_vector() {
        let (model, vectors) = TfidfModel::fit(&["The System", "Data Analyst"]);
        assert!(vectors[0].is_zero());
        assert_eq!(model.vocabulary_size(), 2);
    }
}
