use serde::{Deserialize, Serialize};

use crate::error::{RecoveryError, RecoveryResult};

/// Whether `threshold` shares can be drawn from `shares` available ones.
pub fn validate_threshold_config(threshold: usize, shares: usize) -> bool {
    (1..=shares).contains(&threshold)
}

/// The `(k, maxBad)` pair driving one reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReconstructionParams {
    /// Number of shares interpolated per candidate (polynomial degree + 1).
    pub threshold: usize,
    /// How many shares may disagree with the accepted polynomial.
    #[serde(default)]
    pub max_bad: usize,
}

impl ReconstructionParams {
    pub const fn new(threshold: usize, max_bad: usize) -> Self {
        Self { threshold, max_bad }
    }

    /// Parameters for the trusting path: every share is assumed authentic.
    pub const fn trusting(threshold: usize) -> Self {
        Self::new(threshold, 0)
    }

    /// Check `1 <= k <= n` and `maxBad <= n - k`.
    pub fn validate(&self, share_count: usize) -> RecoveryResult<()> {
        if self.threshold == 0 {
            return Err(RecoveryError::InvalidThreshold(
                self.threshold,
                share_count,
            ));
        }
        if !validate_threshold_config(self.threshold, share_count) {
            return Err(RecoveryError::InsufficientShares(
                self.threshold,
                share_count,
            ));
        }
        let limit = share_count - self.threshold;
        if self.max_bad > limit {
            return Err(RecoveryError::InvalidTolerance {
                max_bad: self.max_bad,
                limit,
            });
        }
        Ok(())
    }

    /// Matches a candidate needs to be accepted: `n - maxBad`.
    pub fn required_matches(&self, share_count: usize) -> usize {
        share_count.saturating_sub(self.max_bad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_threshold_config_accepts_expected_inputs() {
        assert!(validate_threshold_config(1, 1));
        assert!(validate_threshold_config(2, 3));
        assert!(validate_threshold_config(3, 3));
        assert!(validate_threshold_config(50, 100));
    }

    #[test]
    fn validate_threshold_config_rejects_out_of_range() {
        assert!(!validate_threshold_config(0, 5));
        assert!(!validate_threshold_config(4, 3));
        assert!(!validate_threshold_config(1, 0));
    }

    #[test]
    fn validate_accepts_boundary_tolerance() {
        assert!(ReconstructionParams::new(2, 2).validate(4).is_ok());
        assert!(ReconstructionParams::new(4, 0).validate(4).is_ok());
        assert!(ReconstructionParams::trusting(1).validate(1).is_ok());
    }

    #[test]
    fn validate_rejects_zero_threshold() {
        assert!(matches!(
            ReconstructionParams::trusting(0).validate(3),
            Err(RecoveryError::InvalidThreshold(0, 3))
        ));
    }

    #[test]
    fn validate_rejects_threshold_above_share_count() {
        assert!(matches!(
            ReconstructionParams::trusting(4).validate(3),
            Err(RecoveryError::InsufficientShares(4, 3))
        ));
    }

    #[test]
    fn validate_rejects_excessive_tolerance() {
        assert!(matches!(
            ReconstructionParams::new(2, 3).validate(4),
            Err(RecoveryError::InvalidTolerance {
                max_bad: 3,
                limit: 2
            })
        ));
    }

    #[test]
    fn required_matches_is_shares_minus_tolerance() {
        assert_eq!(ReconstructionParams::new(2, 1).required_matches(4), 3);
        assert_eq!(ReconstructionParams::trusting(2).required_matches(4), 4);
    }

    #[test]
    fn max_bad_defaults_to_zero_when_deserialized() {
        let params: ReconstructionParams =
            serde_json::from_str(r#"{"threshold": 3}"#).unwrap();
        assert_eq!(params, ReconstructionParams::trusting(3));
    }
}
