// serpshare-core/src/analysis.rs

//! `analysis.rs`
//! One-shot entry point: a keyword query in, a full attribution report out.
//!
//! Runs validation, feature extraction, scaling and scoring, share and volume
//! distribution, aggregation and ordering with a fresh model per call.

use log::{debug, info};
use serde::Serialize;

use crate::aggregate::{aggregate_by_domain, merge_domains, sort_candidates, AggregatedDomain, SortOrder};
use crate::candidate::KeywordQuery;
use crate::config::ResolvedConfig;
use crate::errors::{AttributionResult, ValidationError};
use crate::model::{distribute, AttributedCandidate, AttributionModel};
use crate::validators::domain_match_key;
use crate::weights::FeatureImportance;

/// Caller-side focus of an analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOptions {
    /// Domain whose statistics are reported separately.
    pub target_domain: Option<String>,
    /// Truncates both views to this many rows after sorting.
    pub top: Option<usize>,
    pub sort: SortOrder,
}

/// The per-candidate ("normal") view row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRow {
    pub domain: String,
    pub rank_absolute: u32,
    pub logit: f64,
    pub domain_share: f64,
    pub ai_potential_volume: f64,
}

impl From<&AttributedCandidate> for CandidateRow {
    fn from(c: &AttributedCandidate) -> Self {
        Self {
            domain: c.candidate.domain.clone(),
            rank_absolute: c.candidate.rank_absolute,
            logit: c.logit,
            domain_share: c.domain_share,
            ai_potential_volume: c.ai_potential_volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub keyword: String,
    pub keyword_volume: f64,
    pub total_volume: f64,
    /// Target's total share when a target is set, otherwise the largest
    /// single candidate share.
    pub top_share: f64,
    pub candidates: Vec<CandidateRow>,
    pub domains: Vec<AggregatedDomain>,
    pub target_domain: Option<String>,
    pub target_domain_stats: Option<AggregatedDomain>,
    pub feature_importance: Vec<FeatureImportance>,
}

/// Runs the whole attribution pipeline for one keyword.
///
/// # Arguments
///
/// * `query` - Keyword, external volume and raw SERP entries.
/// * `config` - Validated weights, α and vectorizer cap.
/// * `options` - Target domain, sort order and truncation.
pub fn analyze(query: &KeywordQuery, config: &ResolvedConfig, options: &AnalysisOptions) -> AttributionResult<AnalysisReport> {
    let keyword_volume = query.volume();
    if !(keyword_volume.is_finite() && keyword_volume >= 0.0) {
        return Err(ValidationError::InvalidVolume(keyword_volume).into());
    }

    info!(
        "Analyzing '{}' with {} SERP candidates (volume {}).",
        query.keyword,
        query.candidates.len(),
        keyword_volume
    );

    let extractor = config.extractor()?;
    let candidates = extractor.extract(&query.candidates, &query.keyword)?;

    let mut model = AttributionModel::new(config.weights);
    let scored = model.fit_transform(&candidates, &query.keyword)?;
    let mut attributed = distribute(scored, keyword_volume)?;

    let domains = aggregate_by_domain(&attributed)?;
    sort_candidates(&mut attributed, options.sort);

    let target_domain_stats = options.target_domain.as_deref().and_then(|target| {
        let key = domain_match_key(target);
        let matching: Vec<&AggregatedDomain> =
            domains.iter().filter(|d| domain_match_key(&d.domain) == key).collect();
        // Spellings like `www.x.com` and `x.com` are one target; report them as one row.
        let label = match matching.as_slice() {
            [single] => single.domain.as_str(),
            _ => key.as_str(),
        };
        let found = merge_domains(label, &matching);
        if found.is_none() {
            debug!("Target domain '{}' does not appear in the SERP for '{}'.", target, query.keyword);
        }
        found
    });

    let top_share = match (&options.target_domain, &target_domain_stats) {
        (Some(_), Some(stats)) => stats.total_domain_share,
        (Some(_), None) => 0.0,
        (None, _) => attributed.iter().map(|c| c.domain_share).fold(0.0, f64::max),
    };

    let limit = options.top.unwrap_or(usize::MAX);
    Ok(AnalysisReport {
        keyword: query.keyword.clone(),
        keyword_volume,
        total_volume: keyword_volume,
        top_share,
        candidates: attributed.iter().take(limit).map(CandidateRow::from).collect(),
        domains: domains.into_iter().take(limit).collect(),
        target_domain: options.target_domain.clone(),
        target_domain_stats,
        feature_importance: model.feature_importance(),
    })
}
