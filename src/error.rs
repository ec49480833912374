//! Public error taxonomy for the search pipeline.
//!
//! Only two kinds of failure are surfaced to callers as hard errors:
//! invalid input parameters (rejected before any network activity) and an
//! expired caller-supplied deadline. Every other failure mode — a discovery
//! strategy erroring out, a fetch timing out, an extractor finding nothing —
//! degrades to a smaller result set or an explicit empty report, and is
//! recorded in logs and per-document failure reasons instead.

use thiserror::Error;

/// Errors surfaced to the immediate caller of the search pipeline.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// The requested result count is outside the accepted range.
    #[error("result limit must be between 1 and {max}, got {got}")]
    InvalidLimit { got: usize, max: usize },

    /// The recency window token is not one of the accepted values.
    #[error("unknown recency window {0:?} (expected hour, day, week, month, or year)")]
    InvalidRecency(String),

    /// The caller-supplied deadline elapsed before the search completed.
    /// Partially collected documents are discarded, not returned.
    #[error("search deadline elapsed before completion")]
    DeadlineExceeded,
}

/// Boxed error type used by internal fallible plumbing.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_limit_message() {
        let e = ScoutError::InvalidLimit { got: 42, max: 10 };
        assert_eq!(e.to_string(), "result limit must be between 1 and 10, got 42");
    }

    #[test]
    fn test_invalid_recency_message() {
        let e = ScoutError::InvalidRecency("fortnight".to_string());
        assert!(e.to_string().contains("fortnight"));
        assert!(e.to_string().contains("hour, day, week, month, or year"));
    }
}
