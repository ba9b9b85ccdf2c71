// File: serpshare-core/src/validators.rs
//! Validation of caller-supplied SERP candidates.
//!
//! Candidates are rejected with a [`ValidationError`] naming their index; they
//! are never dropped silently.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ValidationError;

// Dot-separated DNS labels: alphanumerics and inner hyphens, at least two labels.
static REGISTRABLE_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$")
        .expect("registrable domain pattern is valid")
});

/// Checks a domain and returns its canonical (trimmed, lowercase) form.
///
/// # Arguments
///
/// * `index` - Position of the candidate in the batch, used in the error.
/// * `domain` - The raw domain field, if present.
pub fn validate_domain(index: usize, domain: Option<&str>) -> Result<String, ValidationError> {
    let Some(raw) = domain else {
        return Err(ValidationError::MissingDomain { index });
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDomain { index });
    }

    let canonical = trimmed.to_ascii_lowercase();
    if canonical.len() > 253 || !REGISTRABLE_DOMAIN.is_match(&canonical) {
        return Err(ValidationError::InvalidDomain {
            index,
            domain: raw.to_string(),
        });
    }

    Ok(canonical)
}

/// Checks that a rank is present and at least 1.
///
/// Zero and negative ranks are rejected rather than clamped to 1.
pub fn validate_rank(index: usize, rank: Option<i64>) -> Result<u32, ValidationError> {
    let Some(rank) = rank else {
        return Err(ValidationError::MissingRank { index });
    };

    match u32::try_from(rank) {
        Ok(r) if r >= 1 => Ok(r),
        _ => Err(ValidationError::InvalidRank { index, rank }),
    }
}

/// Key used to compare a caller's target domain against candidate domains.
///
/// Case-insensitive, and `www.example.com` matches `example.com`.
pub fn domain_match_key(domain: &str) -> String {
    let lower = domain.trim().to_ascii_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain_canonicalizes() {
        assert_eq!(validate_domain(0, Some("  Example.COM ")).unwrap(), "example.com");
        assert_eq!(validate_domain(0, Some("www.videoinu.com")).unwrap(), "www.videoinu.com");
    }

    #[test]
    fn test_validate_domain_missing_or_blank() {
        assert_eq!(validate_domain(3, None), Err(ValidationError::MissingDomain { index: 3 }));
        assert_eq!(validate_domain(4, Some("   ")), Err(ValidationError::MissingDomain { index: 4 }));
    }

    #[test]
    fn test_validate_domain_rejects_urls() {
        for bad in ["https://example.com", "example.com/path", "exa mple.com", "localhost", "-bad.com"] {
            assert!(
                matches!(validate_domain(1, Some(bad)), Err(ValidationError::InvalidDomain { index: 1, .. })),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_validate_rank() {
        assert_eq!(validate_rank(0, Some(1)), Ok(1));
        assert_eq!(validate_rank(0, Some(57)), Ok(57));
        assert_eq!(validate_rank(2, None), Err(ValidationError::MissingRank { index: 2 }));
        assert_eq!(validate_rank(2, Some(0)), Err(ValidationError::InvalidRank { index: 2, rank: 0 }));
        assert_eq!(validate_rank(2, Some(-5)), Err(ValidationError::InvalidRank { index: 2, rank: -5 }));
        assert!(validate_rank(2, Some(i64::MAX)).is_err());
    }

    #[test]
    fn test_domain_match_key() {
        assert_eq!(domain_match_key("WWW.Example.com"), "example.com");
        assert_eq!(domain_match_key("example.com"), "example.com");
        assert_eq!(domain_match_key("www."), "www.");
    }
}
