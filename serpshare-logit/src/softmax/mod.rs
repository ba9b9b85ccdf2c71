//! Numerically stable softmax over a batch of logits.

extern crate alloc;
use alloc::vec::Vec;
use core::fmt;
use libm::exp;

use crate::Share;

/// Reasons a softmax cannot produce a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoftmaxError {
    /// No logits were supplied, so no distribution exists.
    Empty,
    /// A logit at this index is NaN or infinite.
    NonFinite(usize),
}

impl fmt::Display for SoftmaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftmaxError::Empty => write!(f, "softmax over an empty batch is undefined"),
            SoftmaxError::NonFinite(i) => write!(f, "logit at index {} is not finite", i),
        }
    }
}

/// Computes `exp(l_i - max) / sum_j exp(l_j - max)`.
///
/// The maximum is always subtracted first, so every exponent is `<= 0` and
/// the largest term is exactly `1.0`. The denominator is therefore `>= 1`.
pub fn stable_softmax(logits: &[f64]) -> Result<Vec<Share>, SoftmaxError> {
    if logits.is_empty() {
        return Err(SoftmaxError::Empty);
    }
    if let Some(i) = logits.iter().position(|l| !l.is_finite()) {
        return Err(SoftmaxError::NonFinite(i));
    }

    let max_logit = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| exp(l - max_logit)).collect();
    let sum: f64 = exps.iter().sum();

    Ok(exps.into_iter().map(|e| e / sum).collect())
}
