use math::MathError;
use num_bigint::BigUint;
use thiserror::Error;

use crate::source::SourceError;

/// Result type specialized for reconstruction operations.
pub type RecoveryResult<T> = std::result::Result<T, RecoveryError>;

/// Errors that can arise while reconstructing a shared secret.
///
/// An exhausted robust search is not an error; see
/// [`SearchOutcome`](crate::robust::SearchOutcome).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("Invalid threshold: {0} must be at least 1 (got {1} shares)")]
    InvalidThreshold(usize, usize),
    #[error("Insufficient shares: need {0}, got {1}")]
    InsufficientShares(usize, usize),
    #[error("Invalid tolerance: max_bad {max_bad} exceeds n - k = {limit}")]
    InvalidTolerance { max_bad: usize, limit: usize },
    #[error("Invalid share index: {0} >= {1}")]
    InvalidIndex(usize, usize),
    #[error("Share index {0} selected more than once")]
    RepeatedIndex(usize),
    #[error("Selection picked {found} shares but the threshold is {expected}")]
    SelectionSize { expected: usize, found: usize },
    #[error("Shares {first} and {second} have the same x-coordinate {x}")]
    DuplicateX {
        first: usize,
        second: usize,
        x: BigUint,
    },
    #[error(transparent)]
    Math(#[from] MathError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl RecoveryError {
    /// Configuration errors are raised before any arithmetic runs.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RecoveryError::InvalidThreshold(..)
                | RecoveryError::InsufficientShares(..)
                | RecoveryError::InvalidTolerance { .. }
                | RecoveryError::InvalidIndex(..)
                | RecoveryError::RepeatedIndex(..)
                | RecoveryError::SelectionSize { .. }
        )
    }

    /// Two shares in one interpolation subset collide on x.
    pub fn is_degenerate(&self) -> bool {
        match self {
            RecoveryError::DuplicateX { .. } => true,
            RecoveryError::Math(err) => err.is_degenerate(),
            _ => false,
        }
    }
}
