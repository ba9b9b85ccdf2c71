// serpshare-core/tests/attribution_properties_tests.rs
//! Whole-pipeline properties of the attribution model: shares form a
//! distribution, volumes add up, softmax is shift invariant and disabled
//! weights have no effect.

use serpshare_core::{
    aggregate_by_domain, distribute, AttributionError, AttributionModel, Candidate, FeatureExtractor,
    FeatureWeights, Features, RawCandidate, ScoredCandidate,
};

const EPSILON: f64 = 1e-9;

fn serp_batch() -> Vec<RawCandidate> {
    vec![
        RawCandidate::new("faceless.video", 1)
            .with_text("Faceless - AI automated content creation", "Converts text to faceless video in minutes")
            .with_serp_features(false, true),
        RawCandidate::new("www.videoinu.com", 2)
            .with_text("Videoinu - Faceless video ai generator free", "Create animated episodes for YouTube")
            .with_serp_features(true, false),
        RawCandidate::new("www.reddit.com", 3).with_text("Best faceless channel tools?", ""),
        RawCandidate::new("faceless.video", 7).with_text("Pricing", "Plans for creators"),
        RawCandidate::new("blog.example.org", 9),
    ]
}

fn extract(keyword: &str) -> Vec<Candidate> {
    FeatureExtractor::default().extract(&serp_batch(), keyword).unwrap()
}

#[test_log::test]
fn shares_and_volumes_sum_up() {
    let candidates = extract("faceless video ai");
    let mut model = AttributionModel::default();
    let rows = model.estimate(&candidates, "faceless video ai", 850.0).unwrap();

    let share: f64 = rows.iter().map(|r| r.domain_share).sum();
    let volume: f64 = rows.iter().map(|r| r.ai_potential_volume).sum();
    assert!((share - 1.0).abs() < EPSILON);
    assert!((volume - 850.0).abs() < EPSILON * 850.0);
    for r in &rows {
        assert!((0.0..=1.0).contains(&r.domain_share));
        assert!((r.ai_potential_volume - r.domain_share * 850.0).abs() < EPSILON);
    }
}

#[test]
fn scaled_features_lie_in_unit_interval() {
    let candidates = extract("faceless video ai");
    let scored = AttributionModel::default().fit_transform(&candidates, "faceless video ai").unwrap();
    for s in &scored {
        for v in s.scaled.as_array() {
            assert!((0.0..=1.0).contains(&v), "scaled value {} out of range", v);
        }
    }
}

#[test]
fn visibility_is_strictly_decreasing_in_rank() {
    let candidates = extract("faceless video ai");
    assert!((candidates[0].features.vis - (-0.15f64).exp()).abs() < 1e-12);
    let mut by_rank = candidates.clone();
    by_rank.sort_by_key(|c| c.rank_absolute);
    for pair in by_rank.windows(2) {
        assert!(pair[0].features.vis > pair[1].features.vis);
    }
}

#[test]
fn softmax_is_shift_invariant() {
    let candidates = extract("faceless video ai");
    let scored = AttributionModel::default().fit_transform(&candidates, "faceless video ai").unwrap();
    let shifted: Vec<ScoredCandidate> = scored
        .iter()
        .cloned()
        .map(|mut s| {
            s.logit += 1000.0;
            s
        })
        .collect();

    let a = distribute(scored, 100.0).unwrap();
    let b = distribute(shifted, 100.0).unwrap();
    for (x, y) in a.iter().zip(&b) {
        assert!((x.domain_share - y.domain_share).abs() < EPSILON);
    }
}

#[test]
fn disabled_weights_are_no_ops() {
    let mut candidates = extract("faceless video ai");
    let baseline = AttributionModel::default().fit_transform(&candidates, "k").unwrap();

    // Feed non-zero reserved features; with λ3 = λ5 = 0 nothing changes.
    for (i, c) in candidates.iter_mut().enumerate() {
        c.features.auth = i as f64 * 0.3;
        c.features.est_clicks = 100.0 / (i as f64 + 1.0);
    }
    let noisy = AttributionModel::default().fit_transform(&candidates, "k").unwrap();

    for (b, n) in baseline.iter().zip(&noisy) {
        let three_feature = 1.5 * n.scaled.vis + 1.0 * n.scaled.sem + 1.0 * n.scaled.feat;
        assert!((b.logit - n.logit).abs() < EPSILON);
        assert!((n.logit - three_feature).abs() < EPSILON);
    }
}

#[test]
fn enabling_reserved_weights_changes_logits() {
    let mut candidates = extract("faceless video ai");
    for (i, c) in candidates.iter_mut().enumerate() {
        c.features.auth = i as f64;
    }
    let weights = FeatureWeights::from_lambdas([1.5, 1.0, 2.0, 1.0, 0.0]).unwrap();
    let default = AttributionModel::default().fit_transform(&candidates, "k").unwrap();
    let enabled = AttributionModel::new(weights).fit_transform(&candidates, "k").unwrap();
    assert!(default.iter().zip(&enabled).any(|(a, b)| (a.logit - b.logit).abs() > EPSILON));
}

#[test]
fn fit_then_transform_reproduces_logits() {
    let candidates = extract("faceless video ai");
    let mut model = AttributionModel::default();
    let fitted = model.fit_transform(&candidates, "faceless video ai").unwrap();
    let transformed = model.transform(&candidates, "faceless video ai").unwrap();
    let a: Vec<f64> = fitted.iter().map(|s| s.logit).collect();
    let b: Vec<f64> = transformed.iter().map(|s| s.logit).collect();
    assert_eq!(a, b);
}

#[test]
fn two_logit_scenario() {
    let make = |position: usize, logit: f64| ScoredCandidate {
        candidate: Candidate {
            position,
            domain: format!("d{}.com", position),
            rank_absolute: position as u32 + 1,
            title: String::new(),
            description: String::new(),
            in_people_also_ask: false,
            is_featured_snippet: false,
            features: Features::default(),
        },
        scaled: Features::default(),
        logit,
    };
    let rows = distribute(vec![make(0, 3.0), make(1, 1.0)], 850.0).unwrap();
    assert!((rows[0].domain_share - 0.8808).abs() < 1e-4);
    assert!((rows[1].domain_share - 0.1192).abs() < 1e-4);
    assert!((rows[0].ai_potential_volume - 748.7).abs() < 0.05);
    assert!((rows[1].ai_potential_volume - 101.3).abs() < 0.05);
}

#[test]
fn empty_batch_fails_explicitly() {
    let candidates = FeatureExtractor::default().extract(&[], "k").unwrap();
    assert!(candidates.is_empty());

    let mut model = AttributionModel::default();
    assert!(matches!(model.estimate(&candidates, "k", 10.0), Err(AttributionError::DegenerateBatch(_))));
    assert!(matches!(distribute(Vec::new(), 10.0), Err(AttributionError::DegenerateBatch(_))));
    assert!(matches!(aggregate_by_domain(&[]), Err(AttributionError::DegenerateBatch(_))));
}

#[test]
fn single_candidate_takes_the_whole_volume() {
    let candidates = FeatureExtractor::default()
        .extract(&[RawCandidate::new("solo.com", 4).with_text("solo", "")], "solo")
        .unwrap();
    let rows = AttributionModel::default().estimate(&candidates, "solo", 120.0).unwrap();
    assert_eq!(rows[0].logit, 0.0);
    assert_eq!(rows[0].domain_share, 1.0);
    assert_eq!(rows[0].ai_potential_volume, 120.0);
}

#[test]
fn aggregation_groups_repeated_domains() {
    let candidates = extract("faceless video ai");
    let rows = AttributionModel::default().estimate(&candidates, "faceless video ai", 850.0).unwrap();
    let domains = aggregate_by_domain(&rows).unwrap();

    assert_eq!(domains.len(), 4);
    let faceless = domains.iter().find(|d| d.domain == "faceless.video").unwrap();
    assert_eq!(faceless.appearances, 2);
    assert_eq!(faceless.best_rank, 1);
    assert_eq!(faceless.worst_rank, 7);
    let expected: f64 = rows
        .iter()
        .filter(|r| r.candidate.domain == "faceless.video")
        .map(|r| r.domain_share)
        .sum();
    assert!((faceless.total_domain_share - expected).abs() < EPSILON);

    let total: f64 = domains.iter().map(|d| d.total_ai_volume).sum();
    assert!((total - 850.0).abs() < 1e-6);
    for pair in domains.windows(2) {
        assert!(pair[0].total_ai_volume >= pair[1].total_ai_volume);
    }
}
