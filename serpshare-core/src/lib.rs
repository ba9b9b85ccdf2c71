// serpshare-core/src/lib.rs
//! # SerpShare Core Library
//!
//! `serpshare-core` estimates how much of a keyword's search volume a web
//! domain can claim, given the ranked SERP results for that keyword. Each
//! result is turned into a small feature vector, the features are min-max
//! scaled within the batch, a weighted logit is computed and a stable softmax
//! over all results yields each result's domain share. Multiplying by the
//! keyword's external volume estimate gives the attributed volume.
//!
//! The library is pure and synchronous: no network access, no shared state.
//! Fetching and caching API responses belongs to the caller.
//!
//! ## Modules
//!
//! * `candidate`: Raw and validated SERP candidates and the keyword query.
//! * `validators`: Domain and rank validation.
//! * `features`: Feature extraction and the TF-IDF semantic scorer.
//! * `weights`: The λ vector, with explicit disabled features.
//! * `scaler`: Per-batch min-max scaling tagged with its keyword.
//! * `model`: Logits, softmax shares and volume distribution.
//! * `aggregate`: Per-domain aggregation and output ordering.
//! * `analysis`: One-shot analysis producing a full report.
//! * `config`: YAML model configuration with layered overrides.
//! * `response_parser`: Reads recorded API responses.
//! * `errors`: The error taxonomy.
//!
//! ## Usage Example
//!
//! ```rust
//! use serpshare_core::{analyze, AnalysisOptions, KeywordQuery, ModelConfig, RawCandidate};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = ModelConfig::load_default()?.resolve()?;
//!     let query = KeywordQuery {
//!         keyword: "faceless video ai".to_string(),
//!         keyword_volume: Some(850.0),
//!         candidates: vec![
//!             RawCandidate::new("faceless.video", 1).with_text("Faceless video", "AI video creation"),
//!             RawCandidate::new("videoinu.com", 2).with_text("Videoinu", "Faceless video ai generator"),
//!         ],
//!     };
//!
//!     let report = analyze(&query, &config, &AnalysisOptions::default())?;
//!     for row in &report.candidates {
//!         println!("{} {:.3} {:.1}", row.domain, row.domain_share, row.ai_potential_volume);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Pipeline operations return [`AttributionError`], which separates invalid
//! input, degenerate (empty) batches and numeric faults. Loading files uses
//! `anyhow::Result` with context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod aggregate;
pub mod analysis;
pub mod candidate;
pub mod config;
pub mod errors;
pub mod features;
pub mod model;
pub mod response_parser;
pub mod scaler;
pub mod validators;
pub mod weights;

/// Re-exports the data model.
pub use candidate::{Candidate, Features, KeywordQuery, RawCandidate};

/// Re-exports the error taxonomy.
pub use errors::{AttributionError, AttributionResult, ValidationError};

/// Re-exports feature extraction.
pub use features::extractor::{FeatureExtractor, DEFAULT_ALPHA};
pub use features::similarity::SimilarityScorer;
pub use features::vectorizer::{TfidfSimilarity, DEFAULT_MAX_FEATURES};

/// Re-exports the model and its weights.
pub use model::{distribute, domain_shares, AttributedCandidate, AttributionModel, ScoredCandidate};
pub use scaler::FittedScaler;
pub use weights::{FeatureImportance, FeatureWeight, FeatureWeights, DEFAULT_LAMBDAS, FEATURE_NAMES};

/// Re-exports aggregation and ordering.
pub use aggregate::{aggregate_by_domain, merge_domains, sort_candidates, AggregatedDomain, SortOrder};

/// Re-exports the one-shot analysis entry point.
pub use analysis::{analyze, AnalysisOptions, AnalysisReport, CandidateRow};

/// Re-exports configuration types.
pub use config::{merge_config, ModelConfig, ResolvedConfig, WeightsConfig};

/// Re-exports response loading.
pub use response_parser::{load_query, parse_api_responses};
