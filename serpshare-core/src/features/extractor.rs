// serpshare-core/src/features/extractor.rs
//! Turns caller-supplied SERP entries into validated candidates with features.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use std::collections::HashMap;

use serpshare_logit::visibility::rank_visibility;

use crate::candidate::{Candidate, Features, RawCandidate};
use crate::errors::{AttributionError, AttributionResult, ValidationError};
use crate::features::similarity::SimilarityScorer;
use crate::features::vectorizer::TfidfSimilarity;
use crate::validators::{validate_domain, validate_rank};

/// Default visibility decay per rank position.
pub const DEFAULT_ALPHA: f64 = 0.15;

/// Computes `vis`, `sem`, `feat`, `auth` and `est_clicks` for a batch.
pub struct FeatureExtractor {
    alpha: f64,
    scorer: Box<dyn SimilarityScorer>,
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("alpha", &self.alpha)
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            scorer: Box::new(TfidfSimilarity::default()),
        }
    }
}

impl FeatureExtractor {
    /// Creates an extractor with the default TF-IDF scorer.
    pub fn new(alpha: f64, max_features: usize) -> Result<Self, ValidationError> {
        if max_features == 0 {
            return Err(ValidationError::InvalidMaxFeatures);
        }
        Self::with_scorer(alpha, Box::new(TfidfSimilarity::new(max_features)))
    }

    /// Creates an extractor with a custom semantic scorer.
    pub fn with_scorer(alpha: f64, scorer: Box<dyn SimilarityScorer>) -> Result<Self, ValidationError> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(ValidationError::InvalidAlpha(alpha));
        }
        Ok(Self { alpha, scorer })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Validates every entry and computes its features.
    ///
    /// The first malformed entry aborts the batch with a [`ValidationError`]
    /// naming its index. An empty input yields an empty batch.
    pub fn extract(&self, raw: &[RawCandidate], keyword: &str) -> AttributionResult<Vec<Candidate>> {
        let mut validated = Vec::with_capacity(raw.len());
        let mut seen_ranks: HashMap<u32, usize> = HashMap::new();

        for (index, entry) in raw.iter().enumerate() {
            let domain = validate_domain(index, entry.domain.as_deref())?;
            let rank = validate_rank(index, entry.rank_absolute)?;

            if let Some(first) = seen_ranks.insert(rank, index) {
                warn!(
                    "Candidates {} and {} share rank_absolute {}; input order breaks the tie.",
                    first, index, rank
                );
            }

            let in_people_also_ask = entry.in_people_also_ask.unwrap_or(false);
            let is_featured_snippet = entry.is_featured_snippet.unwrap_or(false);
            let flags = u8::from(in_people_also_ask) + u8::from(is_featured_snippet);

            validated.push(Candidate {
                position: index,
                domain,
                rank_absolute: rank,
                title: entry.title.clone().unwrap_or_default(),
                description: entry.description.clone().unwrap_or_default(),
                in_people_also_ask,
                is_featured_snippet,
                features: Features {
                    vis: rank_visibility(rank, self.alpha),
                    feat: f64::from(flags) / 2.0,
                    ..Features::default()
                },
            });
        }

        let texts: Vec<String> = validated.iter().map(Candidate::text_for_semantics).collect();
        let semantic = self.scorer.similarities(keyword, &texts);
        if semantic.len() != texts.len() {
            return Err(AttributionError::NumericGuard {
                stage: "semantic",
                detail: format!(
                    "{} scorer returned {} scores for {} candidates",
                    self.scorer.name(),
                    semantic.len(),
                    texts.len()
                ),
            });
        }

        for (candidate, sem) in validated.iter_mut().zip(semantic) {
            candidate.features.sem = if sem.is_finite() {
                sem.clamp(0.0, 1.0)
            } else {
                debug!("Non-finite semantic score for '{}' replaced by 0.", candidate.domain);
                0.0
            };
        }

        debug!(
            "Extracted features for {} candidates of '{}' using the {} scorer.",
            validated.len(),
            keyword,
            self.scorer.name()
        );
        Ok(validated)
    }
}
