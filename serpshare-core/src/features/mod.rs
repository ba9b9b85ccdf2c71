// serpshare-core/src/features/mod.rs
//! Feature extraction for SERP candidates.
//!
//! * `extractor`: turns raw candidates into validated [`crate::Candidate`]s with features.
//! * `similarity`: the pluggable `SimilarityScorer` trait behind the semantic feature.
//! * `vectorizer`: the default batch-local TF-IDF scorer.
//! * `stop_words`: the English stop word set used by the vectorizer.
//!
//! License: MIT OR APACHE 2.0

pub mod extractor;
pub mod similarity;
pub mod stop_words;
pub mod vectorizer;
