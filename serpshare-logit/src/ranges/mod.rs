//! Per-batch min/max ranges and the affine rescale built on them.

/// Observed bounds of one feature column within a single batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    /// Width of the range. Zero when every value in the batch was equal.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Rescales `value` into `[0, 1]` relative to this range.
    ///
    /// A zero-width range maps every value to `0.0`. Values outside the
    /// fitted bounds are clamped, and non-finite input maps to `0.0`.
    pub fn scale(&self, value: f64) -> f64 {
        let span = self.span();
        // `!(span > 0.0)` also catches a NaN span.
        if !(span > 0.0) || !value.is_finite() {
            return 0.0;
        }
        let scaled = (value - self.min) / span;
        if scaled.is_finite() {
            scaled.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Computes the min/max of a column, skipping non-finite entries.
///
/// Returns `None` when there is no finite value to fit on.
pub fn compute_range(values: &[f64]) -> Option<ColumnRange> {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let first = finite.next()?;

    let range = finite.fold(ColumnRange { min: first, max: first }, |acc, v| ColumnRange {
        min: acc.min.min(v),
        max: acc.max.max(v),
    });
    Some(range)
}
