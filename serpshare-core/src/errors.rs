//! errors.rs - Error types for the serpshare-core library.
//!
//! The attribution pipeline fails fast with one of three kinds of error so a
//! caller can tell bad input apart from an unusable batch or a numeric fault.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All errors the attribution pipeline can return.
///
/// `#[non_exhaustive]` leaves room for new kinds without breaking callers
/// that match on this enum.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AttributionError {
    /// The caller supplied input or configuration that cannot be used as-is.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The batch has no candidates, so shares and aggregates are undefined.
    #[error("Degenerate batch: {0}")]
    DegenerateBatch(String),

    /// A non-finite value appeared where no documented fallback applies.
    #[error("Non-finite value during {stage}: {detail}")]
    NumericGuard { stage: &'static str, detail: String },
}

/// Specific reasons an input or configuration value was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("candidate {index} has no domain")]
    MissingDomain { index: usize },

    #[error("candidate {index} has an invalid domain '{domain}' (expected a bare registrable domain)")]
    InvalidDomain { index: usize, domain: String },

    #[error("candidate {index} has no rank_absolute")]
    MissingRank { index: usize },

    #[error("candidate {index} has rank_absolute {rank}; ranks start at 1")]
    InvalidRank { index: usize, rank: i64 },

    #[error("transform called before any scaler was fitted")]
    NotFitted,

    #[error("scaler was fitted for keyword '{fitted}' and cannot be applied to keyword '{requested}'")]
    ScalerKeywordMismatch { fitted: String, requested: String },

    #[error("weight for '{feature}' must be finite, got {value}")]
    NonFiniteWeight { feature: &'static str, value: f64 },

    #[error("visibility decay must be a finite positive number, got {0}")]
    InvalidAlpha(f64),

    #[error("max_features must be at least 1")]
    InvalidMaxFeatures,

    #[error("keyword volume must be a finite non-negative number, got {0}")]
    InvalidVolume(f64),
}

/// Convenience alias used throughout the attribution pipeline.
pub type AttributionResult<T> = Result<T, AttributionError>;
