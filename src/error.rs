//! Setup-time error types
//!
//! Runtime play never returns errors: physics invariants are enforced by
//! clamping, and a bad prediction degrades to "no intercept". Only match
//! construction can fail, and it fails fast with a descriptive error.

use thiserror::Error;

/// Errors raised while building a match from a [`GameConfig`](crate::GameConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// A geometry constant is missing its valid range (non-finite, zero
    /// extents, paddle outside the scoring line, and so on).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    /// An AI difficulty profile carries an out-of-range parameter.
    #[error("invalid AI profile: {0}")]
    InvalidAiProfile(&'static str),

    /// `max_score` must be at least 1 for a match to be winnable.
    #[error("max_score must be at least 1")]
    InvalidMaxScore,
}
