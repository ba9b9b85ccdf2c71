// serpshare-core/src/model.rs
//! The attribution model: scaling, logits, softmax shares and volumes.
//!
//! An `AttributionModel` belongs to one request. The scaler it fits is tagged
//! with the keyword, and `transform` refuses to apply it to any other keyword.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use serde::Serialize;

use serpshare_logit::softmax::{stable_softmax, SoftmaxError};

use crate::candidate::{Candidate, Features};
use crate::errors::{AttributionError, AttributionResult, ValidationError};
use crate::scaler::FittedScaler;
use crate::weights::{FeatureImportance, FeatureWeights};

/// A candidate with its scaled features and logit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub scaled: Features,
    pub logit: f64,
}

/// A scored candidate with its share of the keyword and its volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributedCandidate {
    pub candidate: Candidate,
    pub scaled: Features,
    pub logit: f64,
    pub domain_share: f64,
    pub ai_potential_volume: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AttributionModel {
    weights: FeatureWeights,
    scaler: Option<FittedScaler>,
}

impl AttributionModel {
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights, scaler: None }
    }

    /// Carries a scaler fitted earlier into this model.
    pub fn with_scaler(mut self, scaler: FittedScaler) -> Self {
        self.scaler = Some(scaler);
        self
    }

    pub fn scaler(&self) -> Option<&FittedScaler> {
        self.scaler.as_ref()
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    /// Replaces `[λ1..λ5]`. All five must be finite.
    pub fn set_lambdas(&mut self, lambdas: [f64; 5]) -> Result<(), ValidationError> {
        self.weights = FeatureWeights::from_lambdas(lambdas)?;
        debug!("Lambdas set to {:?}", lambdas);
        Ok(())
    }

    pub fn feature_importance(&self) -> Vec<FeatureImportance> {
        self.weights.importance()
    }

    /// Fits a scaler on this batch, keeps it, and scores every candidate.
    pub fn fit_transform(&mut self, candidates: &[Candidate], keyword: &str) -> AttributionResult<Vec<ScoredCandidate>> {
        let scaler = FittedScaler::fit(keyword, candidates)?;
        let scored = self.score(&scaler, candidates)?;
        self.scaler = Some(scaler);
        Ok(scored)
    }

    /// Scores a batch with the scaler from an earlier fit, without refitting.
    pub fn transform(&self, candidates: &[Candidate], keyword: &str) -> AttributionResult<Vec<ScoredCandidate>> {
        let scaler = self.scaler.as_ref().ok_or(ValidationError::NotFitted)?;
        scaler.check_keyword(keyword)?;
        if candidates.is_empty() {
            return Err(AttributionError::DegenerateBatch(format!(
                "no candidates to transform for keyword '{}'",
                keyword
            )));
        }
        self.score(scaler, candidates)
    }

    /// `fit_transform` followed by [`distribute`].
    pub fn estimate(
        &mut self,
        candidates: &[Candidate],
        keyword: &str,
        keyword_volume: f64,
    ) -> AttributionResult<Vec<AttributedCandidate>> {
        let scored = self.fit_transform(candidates, keyword)?;
        distribute(scored, keyword_volume)
    }

    fn score(&self, scaler: &FittedScaler, candidates: &[Candidate]) -> AttributionResult<Vec<ScoredCandidate>> {
        candidates
            .iter()
            .map(|candidate| {
                let scaled = scaler.apply(&candidate.features);
                let logit = self.weights.logit(&scaled);
                if !logit.is_finite() {
                    return Err(AttributionError::NumericGuard {
                        stage: "logit",
                        detail: format!("candidate {} ({}) produced {}", candidate.position, candidate.domain, logit),
                    });
                }
                Ok(ScoredCandidate { candidate: candidate.clone(), scaled, logit })
            })
            .collect()
    }
}

/// Softmax shares of `logits`, shifted by the maximum logit.
pub fn domain_shares(logits: &[f64]) -> AttributionResult<Vec<f64>> {
    stable_softmax(logits).map_err(|e| match e {
        SoftmaxError::Empty => AttributionError::DegenerateBatch(e.to_string()),
        SoftmaxError::NonFinite(_) => AttributionError::NumericGuard {
            stage: "softmax",
            detail: e.to_string(),
        },
    })
}

/// Turns logits into shares and multiplies them by `keyword_volume`.
///
/// A zero volume still yields shares. Negative or non-finite volume is
/// rejected.
pub fn distribute(scored: Vec<ScoredCandidate>, keyword_volume: f64) -> AttributionResult<Vec<AttributedCandidate>> {
    if !(keyword_volume.is_finite() && keyword_volume >= 0.0) {
        return Err(ValidationError::InvalidVolume(keyword_volume).into());
    }

    let logits: Vec<f64> = scored.iter().map(|s| s.logit).collect();
    let shares = domain_shares(&logits)?;

    Ok(scored
        .into_iter()
        .zip(shares)
        .map(|(s, domain_share)| AttributedCandidate {
            candidate: s.candidate,
            scaled: s.scaled,
            logit: s.logit,
            domain_share,
            ai_potential_volume: domain_share * keyword_volume,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn candidate(position: usize, rank: u32, vis: f64, sem: f64, feat: f64) -> Candidate {
        Candidate {
            position,
            domain: format!("site{}.com", position),
            rank_absolute: rank,
            title: String::new(),
            description: String::new(),
            in_people_also_ask: false,
            is_featured_snippet: false,
            features: Features { vis, sem, auth: 0.0, feat, est_clicks: 0.0 },
        }
    }

    fn scored(logits: &[f64]) -> Vec<ScoredCandidate> {
        logits
            .iter()
            .enumerate()
            .map(|(i, &logit)| ScoredCandidate {
                candidate: candidate(i, i as u32 + 1, 0.0, 0.0, 0.0),
                scaled: Features::default(),
                logit,
            })
            .collect()
    }

    #[test]
    fn test_distribute_three_to_one() {
        let rows = distribute(scored(&[3.0, 1.0]), 850.0).unwrap();
        assert!((rows[0].domain_share - 0.8808).abs() < 1e-4);
        assert!((rows[1].domain_share - 0.1192).abs() < 1e-4);
        assert!((rows[0].ai_potential_volume - 748.7).abs() < 0.05);
        assert!((rows[1].ai_potential_volume - 101.3).abs() < 0.05);
    }

    #[test]
    fn test_zero_volume_keeps_shares() {
        let rows = distribute(scored(&[0.5, 0.2, 0.1]), 0.0).unwrap();
        let total: f64 = rows.iter().map(|r| r.domain_share).sum();
        assert!((total - 1.0).abs() < EPSILON);
        assert!(rows.iter().all(|r| r.ai_potential_volume == 0.0));
    }

    #[test]
    fn test_distribute_rejects_bad_volume() {
        assert!(matches!(
            distribute(scored(&[1.0]), -1.0),
            Err(AttributionError::Validation(ValidationError::InvalidVolume(_)))
        ));
        assert!(distribute(scored(&[1.0]), f64::NAN).is_err());
    }

    #[test]
    fn test_distribute_empty_is_degenerate() {
        assert!(matches!(distribute(Vec::new(), 10.0), Err(AttributionError::DegenerateBatch(_))));
    }

    #[test]
    fn test_fit_transform_logits() {
        let batch = vec![
            candidate(0, 1, 0.9, 1.0, 1.0),
            candidate(1, 2, 0.5, 0.0, 0.0),
            candidate(2, 3, 0.1, 0.5, 0.5),
        ];
        let mut model = AttributionModel::default();
        let scored = model.fit_transform(&batch, "k").unwrap();
        assert!((scored[0].logit - 3.5).abs() < EPSILON);
        assert!((scored[1].logit - 0.75).abs() < EPSILON);
        assert!((scored[2].logit - 1.0).abs() < EPSILON);
        assert!(model.scaler().is_some());
    }

    #[test]
    fn test_transform_requires_fit() {
        let model = AttributionModel::default();
        let err = model.transform(&[candidate(0, 1, 0.5, 0.5, 0.5)], "k").unwrap_err();
        assert_eq!(err, AttributionError::Validation(ValidationError::NotFitted));
    }

    #[test]
    fn test_transform_reproduces_fit() {
        let batch = vec![candidate(0, 1, 0.86, 0.3, 1.0), candidate(1, 5, 0.47, 0.8, 0.0)];
        let mut model = AttributionModel::default();
        let fitted = model.fit_transform(&batch, "k").unwrap();
        let again = model.transform(&batch, "k").unwrap();
        assert_eq!(fitted, again);
    }

    #[test]
    fn test_transform_rejects_other_keyword() {
        let batch = vec![candidate(0, 1, 0.86, 0.3, 1.0)];
        let mut model = AttributionModel::default();
        model.fit_transform(&batch, "first").unwrap();
        assert!(matches!(
            model.transform(&batch, "second"),
            Err(AttributionError::Validation(ValidationError::ScalerKeywordMismatch { .. }))
        ));
    }

    #[test]
    fn test_scaler_can_be_passed_forward() {
        let batch = vec![candidate(0, 1, 0.86, 0.3, 1.0), candidate(1, 2, 0.7, 0.1, 0.0)];
        let mut first = AttributionModel::default();
        let expected = first.fit_transform(&batch, "k").unwrap();

        let scaler = first.scaler().cloned().unwrap();
        let second = AttributionModel::default().with_scaler(scaler);
        assert_eq!(second.transform(&batch, "k").unwrap(), expected);
    }

    #[test]
    fn test_set_lambdas() {
        let mut model = AttributionModel::default();
        model.set_lambdas([2.0, 1.5, 1.0, 1.2, 0.8]).unwrap();
        assert_eq!(model.weights().lambdas(), [2.0, 1.5, 1.0, 1.2, 0.8]);
        assert!(model.set_lambdas([1.0, 1.0, f64::NAN, 1.0, 1.0]).is_err());
        assert_eq!(model.weights().lambdas(), [2.0, 1.5, 1.0, 1.2, 0.8]);
    }
}
