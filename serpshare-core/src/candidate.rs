// serpshare-core/src/candidate.rs
//! Data model for SERP candidates as they move through the pipeline.
//!
//! Each stage produces a new value instead of mutating the previous one:
//! [`RawCandidate`] (caller input) becomes a validated [`Candidate`] with
//! [`Features`], which the model turns into a `ScoredCandidate` and finally an
//! `AttributedCandidate`.

use serde::{Deserialize, Serialize};

/// One SERP entry exactly as supplied by the caller.
///
/// Everything is optional here so that malformed entries reach validation and
/// are reported, rather than failing deserialization of the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawCandidate {
    pub domain: Option<String>,
    pub rank_absolute: Option<i64>,
    pub page: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub in_people_also_ask: Option<bool>,
    pub is_featured_snippet: Option<bool>,
}

impl RawCandidate {
    /// Shorthand used by callers and tests that build batches by hand.
    pub fn new(domain: &str, rank_absolute: i64) -> Self {
        Self {
            domain: Some(domain.to_string()),
            rank_absolute: Some(rank_absolute),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, title: &str, description: &str) -> Self {
        self.title = Some(title.to_string());
        self.description = Some(description.to_string());
        self
    }

    pub fn with_serp_features(mut self, in_people_also_ask: bool, is_featured_snippet: bool) -> Self {
        self.in_people_also_ask = Some(in_people_also_ask);
        self.is_featured_snippet = Some(is_featured_snippet);
        self
    }
}

/// Feature vector of a single candidate.
///
/// `auth` and `est_clicks` are reserved: the extractor always sets them to 0
/// but they stay in the schema so the logit formula is uniform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Features {
    pub vis: f64,
    pub sem: f64,
    pub auth: f64,
    pub feat: f64,
    pub est_clicks: f64,
}

impl Features {
    /// Values in the fixed column order used by the scaler and the weights:
    /// visibility, semantic, authority, features, estimated clicks.
    pub fn as_array(&self) -> [f64; 5] {
        [self.vis, self.sem, self.auth, self.feat, self.est_clicks]
    }

    pub fn from_array(values: [f64; 5]) -> Self {
        let [vis, sem, auth, feat, est_clicks] = values;
        Self { vis, sem, auth, feat, est_clicks }
    }
}

/// A validated SERP candidate with its extracted features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Index of this entry in the caller's input order. Used as the stable
    /// tie-break whenever two candidates compare equal.
    pub position: usize,
    pub domain: String,
    pub rank_absolute: u32,
    pub title: String,
    pub description: String,
    pub in_people_also_ask: bool,
    pub is_featured_snippet: bool,
    pub features: Features,
}

impl Candidate {
    /// Title and description joined the way the semantic scorer reads them.
    pub fn text_for_semantics(&self) -> String {
        format!("{} {}", self.title, self.description).trim().to_string()
    }
}

/// A keyword, its external volume estimate and its SERP candidates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct KeywordQuery {
    pub keyword: String,
    /// External volume estimate. Missing or null is treated as zero.
    #[serde(default)]
    pub keyword_volume: Option<f64>,
    #[serde(default)]
    pub candidates: Vec<RawCandidate>,
}

impl KeywordQuery {
    pub fn volume(&self) -> f64 {
        self.keyword_volume.unwrap_or(0.0)
    }
}
