// serpshare-core/src/features/vectorizer.rs
//! Batch-local TF-IDF scorer, the default `SimilarityScorer`.
//!
//! The vocabulary and IDF statistics are fitted on the keyword plus the
//! candidate texts of one call, so scores are only comparable within a batch.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use serpshare_logit::tfidf::{cosine_similarity, fit_idf, weigh};

use crate::features::similarity::SimilarityScorer;
use crate::features::stop_words::is_stop_word;

/// Default cap on the vocabulary size.
pub const DEFAULT_MAX_FEATURES: usize = 1000;

// Runs of two or more word characters.
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Lowercases `text` and splits it into non-stop-word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// TF-IDF cosine similarity fitted per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfSimilarity {
    max_features: usize,
}

impl Default for TfidfSimilarity {
    fn default() -> Self {
        Self { max_features: DEFAULT_MAX_FEATURES }
    }
}

impl TfidfSimilarity {
    /// `max_features` of zero is treated as one.
    pub fn new(max_features: usize) -> Self {
        Self { max_features: max_features.max(1) }
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Keeps the `max_features` most frequent terms of the corpus, ties broken
    /// alphabetically, and assigns them indices in alphabetical order.
    fn build_vocabulary(&self, documents: &[Vec<String>]) -> HashMap<String, usize> {
        let mut frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in documents {
            for token in doc {
                *frequency.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();
        kept.into_iter()
            .enumerate()
            .map(|(i, term)| (term.to_string(), i))
            .collect()
    }
}

fn count_terms(tokens: &[String], vocabulary: &HashMap<String, usize>) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        if let Some(&index) = vocabulary.get(token) {
            *counts.entry(index).or_insert(0) += 1;
        }
    }
    counts
}

impl SimilarityScorer for TfidfSimilarity {
    fn similarities(&self, keyword: &str, texts: &[String]) -> Vec<f64> {
        let keyword_tokens = tokenize(keyword);
        let text_tokens: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();

        // Blank documents are left out of fitting. A non-blank document with
        // no surviving tokens (only stop words) still counts towards `n`.
        let corpus: Vec<Vec<String>> = std::iter::once((keyword, &keyword_tokens))
            .chain(texts.iter().map(String::as_str).zip(&text_tokens))
            .filter(|(raw, _)| !raw.trim().is_empty())
            .map(|(_, tokens)| tokens.clone())
            .collect();

        if keyword_tokens.is_empty() || corpus.is_empty() {
            debug!("TF-IDF corpus is degenerate for keyword '{}'; semantic scores fall back to 0.", keyword);
            return vec![0.0; texts.len()];
        }

        let vocabulary = self.build_vocabulary(&corpus);
        let corpus_counts: Vec<BTreeMap<usize, usize>> =
            corpus.iter().map(|doc| count_terms(doc, &vocabulary)).collect();
        let idf = fit_idf(&corpus_counts, vocabulary.len());
        debug!(
            "Fitted TF-IDF over {} documents with a vocabulary of {} terms.",
            corpus.len(),
            vocabulary.len()
        );

        let keyword_vector = weigh(&count_terms(&keyword_tokens, &vocabulary), &idf);
        text_tokens
            .iter()
            .map(|tokens| {
                let vector = weigh(&count_terms(tokens, &vocabulary), &idf);
                cosine_similarity(&keyword_vector, &vector)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}
