//! Configuration management for `serpshare-core`.
//!
//! The model has few tunables: the five logit weights, the visibility decay α
//! and the vectorizer's vocabulary cap. They are read from YAML, layered
//! (built-in defaults, then a user file, then command-line overrides) and
//! finally resolved into validated values.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{AttributionResult, ValidationError};
use crate::features::extractor::{FeatureExtractor, DEFAULT_ALPHA};
use crate::features::vectorizer::DEFAULT_MAX_FEATURES;
use crate::weights::{FeatureWeights, DEFAULT_LAMBDAS};

/// Logit weights as written in a config file. Absent entries are inherited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub visibility: Option<f64>,
    pub semantic: Option<f64>,
    pub authority: Option<f64>,
    pub features: Option<f64>,
    pub estimated_clicks: Option<f64>,
}

impl WeightsConfig {
    /// Every weight set, in λ1..λ5 order.
    pub fn from_lambdas(lambdas: [f64; 5]) -> Self {
        let [vis, sem, auth, feat, clicks] = lambdas;
        Self {
            visibility: Some(vis),
            semantic: Some(sem),
            authority: Some(auth),
            features: Some(feat),
            estimated_clicks: Some(clicks),
        }
    }

    fn as_array(&self) -> [Option<f64>; 5] {
        [self.visibility, self.semantic, self.authority, self.features, self.estimated_clicks]
    }
}

/// Top-level shape of a model configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub weights: WeightsConfig,
    /// α in `vis = exp(-α · rank)`.
    pub visibility_decay: Option<f64>,
    /// Vocabulary cap of the TF-IDF vectorizer.
    pub max_features: Option<usize>,
}

/// Validated configuration, ready to build a pipeline from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConfig {
    pub weights: FeatureWeights,
    pub alpha: f64,
    pub max_features: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            weights: FeatureWeights::default(),
            alpha: DEFAULT_ALPHA,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl ResolvedConfig {
    /// Builds the feature extractor these settings describe.
    pub fn extractor(&self) -> Result<FeatureExtractor, ValidationError> {
        FeatureExtractor::new(self.alpha, self.max_features)
    }
}

impl ModelConfig {
    /// Loads a model configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading model configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ModelConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config
            .resolve()
            .with_context(|| format!("Invalid model configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Loads the built-in defaults embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default model configuration from embedded string...");
        let default_yaml = include_str!("../config/default_model.yaml");
        serde_yml::from_str(default_yaml).context("Failed to parse default model configuration")
    }

    /// Fills gaps with built-in constants and validates every value.
    pub fn resolve(&self) -> AttributionResult<ResolvedConfig> {
        let configured = self.weights.as_array();
        let lambdas: [f64; 5] = std::array::from_fn(|i| configured[i].unwrap_or(DEFAULT_LAMBDAS[i]));
        let weights = FeatureWeights::from_lambdas(lambdas)?;

        let alpha = self.visibility_decay.unwrap_or(DEFAULT_ALPHA);
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(ValidationError::InvalidAlpha(alpha).into());
        }

        let max_features = self.max_features.unwrap_or(DEFAULT_MAX_FEATURES);
        if max_features == 0 {
            return Err(ValidationError::InvalidMaxFeatures.into());
        }

        Ok(ResolvedConfig { weights, alpha, max_features })
    }
}

/// Layers `overrides` on top of `base`; any value the override sets wins.
pub fn merge_config(base: ModelConfig, overrides: Option<ModelConfig>) -> ModelConfig {
    let Some(user) = overrides else {
        debug!("merge_config called without overrides.");
        return base;
    };

    let pick = |user: Option<f64>, base: Option<f64>| user.or(base);
    let merged = ModelConfig {
        weights: WeightsConfig {
            visibility: pick(user.weights.visibility, base.weights.visibility),
            semantic: pick(user.weights.semantic, base.weights.semantic),
            authority: pick(user.weights.authority, base.weights.authority),
            features: pick(user.weights.features, base.weights.features),
            estimated_clicks: pick(user.weights.estimated_clicks, base.weights.estimated_clicks),
        },
        visibility_decay: user.visibility_decay.or(base.visibility_decay),
        max_features: user.max_features.or(base.max_features),
    };
    debug!("Merged model configuration: {:?}", merged);
    merged
}
