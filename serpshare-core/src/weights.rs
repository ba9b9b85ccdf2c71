// serpshare-core/src/weights.rs
//! Logit weights (the λ vector) and their read-only importance view.
//!
//! A weight of exactly zero marks its feature as disabled. Disabled features
//! stay in the logit formula but contribute nothing, whatever their value.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Feature names in column order: visibility, semantic, authority, features,
/// estimated clicks.
pub const FEATURE_NAMES: [&str; 5] = ["visibility", "semantic", "authority", "features", "estimated_clicks"];

/// Built-in λ1..λ5.
pub const DEFAULT_LAMBDAS: [f64; 5] = [1.5, 1.0, 0.0, 1.0, 0.0];

/// Weight of a single logit term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "lambda", rename_all = "snake_case")]
pub enum FeatureWeight {
    Enabled(f64),
    Disabled,
}

impl FeatureWeight {
    fn from_lambda(lambda: f64) -> Self {
        if lambda == 0.0 {
            FeatureWeight::Disabled
        } else {
            FeatureWeight::Enabled(lambda)
        }
    }

    pub fn lambda(&self) -> f64 {
        match self {
            FeatureWeight::Enabled(l) => *l,
            FeatureWeight::Disabled => 0.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, FeatureWeight::Enabled(_))
    }

    /// `λ · x`, or exactly `0.0` when disabled (even for a NaN `x`).
    pub fn contribution(&self, x: f64) -> f64 {
        match self {
            FeatureWeight::Enabled(l) => l * x,
            FeatureWeight::Disabled => 0.0,
        }
    }
}

/// The full λ vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub vis: FeatureWeight,
    pub sem: FeatureWeight,
    pub auth: FeatureWeight,
    pub feat: FeatureWeight,
    pub clicks: FeatureWeight,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            vis: FeatureWeight::Enabled(1.5),
            sem: FeatureWeight::Enabled(1.0),
            auth: FeatureWeight::Disabled,
            feat: FeatureWeight::Enabled(1.0),
            clicks: FeatureWeight::Disabled,
        }
    }
}

impl FeatureWeights {
    /// Builds weights from `[λ1, λ2, λ3, λ4, λ5]`.
    ///
    /// Every value must be finite; sign and magnitude are not checked.
    pub fn from_lambdas(lambdas: [f64; 5]) -> Result<Self, ValidationError> {
        for (value, feature) in lambdas.iter().zip(FEATURE_NAMES) {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteWeight { feature, value: *value });
            }
        }
        let [vis, sem, auth, feat, clicks] = lambdas.map(FeatureWeight::from_lambda);
        Ok(Self { vis, sem, auth, feat, clicks })
    }

    pub fn lambdas(&self) -> [f64; 5] {
        self.as_array().map(|w| w.lambda())
    }

    fn as_array(&self) -> [FeatureWeight; 5] {
        [self.vis, self.sem, self.auth, self.feat, self.clicks]
    }

    /// `λ1·vis + λ2·sem + λ3·auth + λ4·feat + λ5·ln(est_clicks + 1)` over
    /// already scaled features.
    pub fn logit(&self, scaled: &crate::candidate::Features) -> f64 {
        self.vis.contribution(scaled.vis)
            + self.sem.contribution(scaled.sem)
            + self.auth.contribution(scaled.auth)
            + self.feat.contribution(scaled.feat)
            + self.clicks.contribution(scaled.est_clicks.ln_1p())
    }

    /// Current weights paired with their feature names.
    pub fn importance(&self) -> Vec<FeatureImportance> {
        FEATURE_NAMES
            .iter()
            .zip(self.as_array())
            .map(|(name, weight)| FeatureImportance {
                feature: name.to_string(),
                lambda: weight.lambda(),
                enabled: weight.is_enabled(),
            })
            .collect()
    }
}

/// One row of the feature importance view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub lambda: f64,
    pub enabled: bool,
}
