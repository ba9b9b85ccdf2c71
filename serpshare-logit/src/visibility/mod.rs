use libm::exp;

/// Exponential rank decay: `exp(-alpha * rank)`.
///
/// Rank 1 maps to `e^-alpha`, and every further position loses a constant
/// fraction of visibility. The result is strictly decreasing in `rank` for
/// any `alpha > 0` and never negative.
pub fn rank_visibility(rank: u32, alpha: f64) -> f64 {
    exp(-alpha * f64::from(rank))
}
