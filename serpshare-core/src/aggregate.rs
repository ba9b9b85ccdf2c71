// serpshare-core/src/aggregate.rs
//! Per-domain aggregation and explicit ordering of attributed candidates.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::errors::{AttributionError, AttributionResult};
use crate::model::AttributedCandidate;

/// One row per unique domain of a keyword's candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedDomain {
    pub domain: String,
    pub appearances: usize,
    pub best_rank: u32,
    pub worst_rank: u32,
    pub avg_rank: f64,
    pub avg_logit: f64,
    pub max_logit: f64,
    pub min_logit: f64,
    pub total_domain_share: f64,
    pub total_ai_volume: f64,
}

/// Output order of the per-candidate view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Highest `ai_potential_volume` first.
    #[default]
    Volume,
    /// Lowest `rank_absolute` first.
    Rank,
}

/// Groups candidates by domain.
///
/// Rows are ordered by `total_ai_volume` descending, then `best_rank`
/// ascending, then domain name.
pub fn aggregate_by_domain(candidates: &[AttributedCandidate]) -> AttributionResult<Vec<AggregatedDomain>> {
    if candidates.is_empty() {
        return Err(AttributionError::DegenerateBatch(
            "cannot aggregate an empty candidate list".to_string(),
        ));
    }

    let mut groups: BTreeMap<&str, Vec<&AttributedCandidate>> = BTreeMap::new();
    for c in candidates {
        groups.entry(c.candidate.domain.as_str()).or_default().push(c);
    }

    let mut rows: Vec<AggregatedDomain> = groups
        .into_iter()
        .map(|(domain, members)| {
            let count = members.len() as f64;
            let ranks = members.iter().map(|m| m.candidate.rank_absolute);
            let logits = members.iter().map(|m| m.logit);
            AggregatedDomain {
                domain: domain.to_string(),
                appearances: members.len(),
                best_rank: ranks.clone().min().unwrap_or_default(),
                worst_rank: ranks.clone().max().unwrap_or_default(),
                avg_rank: ranks.map(f64::from).sum::<f64>() / count,
                avg_logit: logits.clone().sum::<f64>() / count,
                max_logit: logits.clone().fold(f64::NEG_INFINITY, f64::max),
                min_logit: logits.fold(f64::INFINITY, f64::min),
                total_domain_share: members.iter().map(|m| m.domain_share).sum(),
                total_ai_volume: members.iter().map(|m| m.ai_potential_volume).sum(),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_ai_volume
            .total_cmp(&a.total_ai_volume)
            .then_with(|| a.best_rank.cmp(&b.best_rank))
            .then_with(|| a.domain.cmp(&b.domain))
    });
    Ok(rows)
}

/// Sorts candidates in place. Equal keys fall back to input position.
pub fn sort_candidates(candidates: &mut [AttributedCandidate], order: SortOrder) {
    candidates.sort_by(|a, b| {
        let primary = match order {
            SortOrder::Volume => b
                .ai_potential_volume
                .total_cmp(&a.ai_potential_volume)
                .then_with(|| b.domain_share.total_cmp(&a.domain_share)),
            SortOrder::Rank => a.candidate.rank_absolute.cmp(&b.candidate.rank_absolute),
        };
        match primary {
            Ordering::Equal => a.candidate.position.cmp(&b.candidate.position),
            other => other,
        }
    });
}

/// Folds several rows into one, as if their candidates had been grouped
/// together. The label becomes the merged row's `domain`.
///
/// Returns `None` for an empty slice.
pub fn merge_domains(label: &str, rows: &[&AggregatedDomain]) -> Option<AggregatedDomain> {
    let (first, rest) = rows.split_first()?;
    let mut merged = (*first).clone();
    merged.domain = label.to_string();
    if rest.is_empty() {
        return Some(merged);
    }

    let mut rank_sum = first.avg_rank * first.appearances as f64;
    let mut logit_sum = first.avg_logit * first.appearances as f64;
    for row in rest {
        merged.appearances += row.appearances;
        merged.best_rank = merged.best_rank.min(row.best_rank);
        merged.worst_rank = merged.worst_rank.max(row.worst_rank);
        merged.max_logit = merged.max_logit.max(row.max_logit);
        merged.min_logit = merged.min_logit.min(row.min_logit);
        merged.total_domain_share += row.total_domain_share;
        merged.total_ai_volume += row.total_ai_volume;
        rank_sum += row.avg_rank * row.appearances as f64;
        logit_sum += row.avg_logit * row.appearances as f64;
    }
    let count = merged.appearances as f64;
    merged.avg_rank = rank_sum / count;
    merged.avg_logit = logit_sum / count;
    Some(merged)
}
