//! TF-IDF weighting over a small, batch-local corpus and cosine similarity
//! between the resulting sparse vectors.
//!
//! Term identifiers are vocabulary indices assigned by the caller; this module
//! only does the arithmetic.

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use libm::{log, sqrt};

/// Sparse, L2-normalized document vector keyed by vocabulary index.
pub type SparseVector = BTreeMap<usize, f64>;

/// Smoothed inverse document frequency: `ln((1 + n) / (1 + df)) + 1`.
///
/// The smoothing behaves as if one extra document contained every term, so
/// the value is finite even for terms that occur in every document.
pub fn smoothed_idf(n_docs: usize, doc_freq: usize) -> f64 {
    let idf = log((1.0 + n_docs as f64) / (1.0 + doc_freq as f64)) + 1.0;
    if idf.is_finite() {
        idf
    } else {
        0.0
    }
}

/// Computes the IDF for every vocabulary entry from per-document term counts.
pub fn fit_idf(documents: &[BTreeMap<usize, usize>], vocabulary_len: usize) -> Vec<f64> {
    let mut doc_freq = alloc::vec![0usize; vocabulary_len];
    for doc in documents {
        for &term in doc.keys() {
            if let Some(df) = doc_freq.get_mut(term) {
                *df += 1;
            }
        }
    }

    doc_freq
        .into_iter()
        .map(|df| smoothed_idf(documents.len(), df))
        .collect()
}

/// Weights raw term counts by IDF and L2-normalizes the result.
///
/// Documents with no known terms produce an empty vector.
pub fn weigh(counts: &BTreeMap<usize, usize>, idf: &[f64]) -> SparseVector {
    let mut vector: SparseVector = counts
        .iter()
        .filter_map(|(&term, &count)| {
            let weight = idf.get(term).copied()? * count as f64;
            (weight.is_finite() && weight > 0.0).then_some((term, weight))
        })
        .collect();

    let norm = l2_norm(&vector);
    if norm > 0.0 && norm.is_finite() {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    } else {
        vector.clear();
    }
    vector
}

fn l2_norm(vector: &SparseVector) -> f64 {
    sqrt(vector.values().map(|w| w * w).sum::<f64>())
}

/// Cosine similarity between two sparse vectors, clamped to `[0, 1]`.
///
/// An empty vector on either side, or any non-finite intermediate, yields
/// `0.0` rather than NaN.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Iterate the shorter vector and probe the longer one.
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = short
        .iter()
        .filter_map(|(term, w)| long.get(term).map(|v| w * v))
        .sum();

    let denom = l2_norm(a) * l2_norm(b);
    let similarity = dot / denom;
    if similarity.is_finite() {
        similarity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
