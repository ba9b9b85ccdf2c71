// serpshare-core/src/features/similarity.rs
//! Defines the `SimilarityScorer` trait used for the semantic feature.
//!
//! The extractor only needs "how close is each candidate text to the keyword",
//! so the scoring method sits behind a trait and can be swapped without
//! touching the rest of the pipeline.
//!
//! License: MIT OR APACHE 2.0

/// Scores the semantic closeness of candidate texts to a keyword.
pub trait SimilarityScorer: Send + Sync {
    /// Returns one score per entry of `texts`, in the same order.
    ///
    /// Implementations must return values in `[0, 1]` and must never return
    /// NaN: empty or degenerate texts score `0.0`. Any vocabulary or weighting
    /// statistics are fitted on this call's `keyword` and `texts` only.
    ///
    /// # Arguments
    /// * `keyword` - The search keyword the candidates were returned for.
    /// * `texts` - Title and description of every candidate in the batch.
    fn similarities(&self, keyword: &str, texts: &[String]) -> Vec<f64>;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}
