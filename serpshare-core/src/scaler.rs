// serpshare-core/src/scaler.rs
//! Per-batch min-max scaler over the five feature columns.
//!
//! A `FittedScaler` is plain data tagged with the keyword it was fitted on,
//! so it can be carried forward explicitly but not reused for another batch.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use serpshare_logit::ranges::{compute_range, ColumnRange};

use crate::candidate::{Candidate, Features};
use crate::errors::{AttributionError, AttributionResult, ValidationError};
use crate::weights::FEATURE_NAMES;

#[derive(Debug, Clone, PartialEq)]
pub struct FittedScaler {
    keyword: String,
    ranges: [ColumnRange; 5],
}

impl FittedScaler {
    /// Fits column ranges on `candidates`. An empty batch cannot be fitted.
    pub fn fit(keyword: &str, candidates: &[Candidate]) -> AttributionResult<Self> {
        if candidates.is_empty() {
            return Err(AttributionError::DegenerateBatch(format!(
                "no candidates to fit a scaler on for keyword '{}'",
                keyword
            )));
        }

        let ranges: [ColumnRange; 5] = std::array::from_fn(|column| {
            let values: Vec<f64> = candidates.iter().map(|c| c.features.as_array()[column]).collect();
            compute_range(&values).unwrap_or_else(|| {
                debug!("Column '{}' has no finite values; scaling it to 0.", FEATURE_NAMES[column]);
                ColumnRange { min: 0.0, max: 0.0 }
            })
        });

        debug!("Fitted scaler for '{}' on {} candidates.", keyword, candidates.len());
        Ok(Self { keyword: keyword.to_string(), ranges })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn ranges(&self) -> &[ColumnRange; 5] {
        &self.ranges
    }

    /// Fails unless this scaler was fitted for `keyword`.
    pub fn check_keyword(&self, keyword: &str) -> Result<(), ValidationError> {
        if self.keyword == keyword {
            Ok(())
        } else {
            Err(ValidationError::ScalerKeywordMismatch {
                fitted: self.keyword.clone(),
                requested: keyword.to_string(),
            })
        }
    }

    /// Rescales each column into `[0, 1]`; constant columns become 0.
    pub fn apply(&self, features: &Features) -> Features {
        let raw = features.as_array();
        Features::from_array(std::array::from_fn(|i| self.ranges[i].scale(raw[i])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(position: usize, vis: f64, sem: f64, feat: f64) -> Candidate {
        Candidate {
            position,
            domain: format!("d{}.com", position),
            rank_absolute: position as u32 + 1,
            title: String::new(),
            description: String::new(),
            in_people_also_ask: false,
            is_featured_snippet: false,
            features: Features { vis, sem, auth: 0.0, feat, est_clicks: 0.0 },
        }
    }

    #[test]
    fn test_fit_empty_is_degenerate() {
        assert!(matches!(FittedScaler::fit("k", &[]), Err(AttributionError::DegenerateBatch(_))));
    }

    #[test]
    fn test_constant_column_scales_to_zero() {
        let batch = vec![candidate(0, 0.9, 0.3, 0.5), candidate(1, 0.5, 0.3, 0.5), candidate(2, 0.1, 0.3, 0.5)];
        let scaler = FittedScaler::fit("k", &batch).unwrap();
        for c in &batch {
            let scaled = scaler.apply(&c.features);
            assert_eq!(scaled.sem, 0.0);
            assert_eq!(scaled.feat, 0.0);
            assert_eq!(scaled.auth, 0.0);
            assert_eq!(scaled.est_clicks, 0.0);
        }
        assert_eq!(scaler.apply(&batch[0].features).vis, 1.0);
        assert_eq!(scaler.apply(&batch[2].features).vis, 0.0);
    }

    #[test]
    fn test_single_candidate_scales_to_zero() {
        let batch = vec![candidate(0, 0.86, 0.4, 1.0)];
        let scaler = FittedScaler::fit("k", &batch).unwrap();
        assert_eq!(scaler.apply(&batch[0].features), Features::default());
    }

    #[test]
    fn test_keyword_mismatch() {
        let scaler = FittedScaler::fit("alpha", &[candidate(0, 1.0, 0.0, 0.0)]).unwrap();
        assert!(scaler.check_keyword("alpha").is_ok());
        assert_eq!(
            scaler.check_keyword("beta"),
            Err(ValidationError::ScalerKeywordMismatch { fitted: "alpha".into(), requested: "beta".into() })
        );
    }
}
