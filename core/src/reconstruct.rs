//! Trusting reconstruction: every share is assumed authentic, so the
//! interpolant through any `k` of them is the sharing polynomial.

use math::{
    interpolation::{lagrange_at_zero, lagrange_polynomial},
    Polynomial, PrimeField,
};
use num_bigint::BigUint;

use crate::{
    error::RecoveryResult,
    params::ReconstructionParams,
    selection::SelectionStrategy,
    share::Share,
    traits::ShareSource,
};

/// `f(0)` interpolated from the first `k` shares.
pub fn reconstruct_secret(
    shares: &[Share],
    threshold: usize,
    field: &PrimeField,
) -> RecoveryResult<BigUint> {
    reconstruct_secret_with(
        shares,
        threshold,
        field,
        &SelectionStrategy::First,
    )
}

/// `f(0)` interpolated from the `k` shares picked by `strategy`.
pub fn reconstruct_secret_with(
    shares: &[Share],
    threshold: usize,
    field: &PrimeField,
    strategy: &SelectionStrategy,
) -> RecoveryResult<BigUint> {
    let subset = select_shares(shares, threshold, strategy)?;
    Ok(lagrange_at_zero(&subset, field)?)
}

/// The full coefficient vector of the interpolant through the `k` selected
/// shares.
pub fn reconstruct_polynomial(
    shares: &[Share],
    threshold: usize,
    field: &PrimeField,
    strategy: &SelectionStrategy,
) -> RecoveryResult<Polynomial<BigUint>> {
    let subset = select_shares(shares, threshold, strategy)?;
    Ok(lagrange_polynomial(&subset, field)?)
}

/// Trusting reconstruction driven by a [`ShareSource`].
pub fn reconstruct_source<S: ShareSource>(
    source: &S,
    strategy: &SelectionStrategy,
) -> RecoveryResult<BigUint> {
    reconstruct_secret_with(
        source.shares(),
        source.threshold(),
        source.field(),
        strategy,
    )
}

fn select_shares<'a>(
    shares: &'a [Share],
    threshold: usize,
    strategy: &SelectionStrategy,
) -> RecoveryResult<Vec<&'a Share>> {
    ReconstructionParams::trusting(threshold).validate(shares.len())?;
    let indices = strategy.select(shares.len(), threshold)?;
    Ok(indices.into_iter().map(|i| &shares[i]).collect())
}

#[cfg(test)]
mod tests {
    use math::{poly, MathError};

    use super::*;
    use crate::error::RecoveryError;

    fn gf17() -> PrimeField {
        PrimeField::from_u64(17).unwrap()
    }

    fn line_shares() -> Vec<Share> {
        vec![(1, 5).into(), (2, 7).into(), (3, 9).into()]
    }

    #[test]
    fn recovers_secret_from_first_shares() {
        let secret =
            reconstruct_secret(&line_shares(), 2, &gf17()).unwrap();
        assert_eq!(secret, BigUint::from(3u8));
    }

    #[test]
    fn every_selection_gives_same_secret() {
        let field = gf17();
        for strategy in [
            SelectionStrategy::Indices(vec![2, 0]),
            SelectionStrategy::Indices(vec![1, 2]),
            SelectionStrategy::Seeded(11),
        ] {
            let secret =
                reconstruct_secret_with(&line_shares(), 2, &field, &strategy)
                    .unwrap();
            assert_eq!(secret, BigUint::from(3u8), "{strategy}");
        }
    }

    #[test]
    fn single_share_threshold_returns_its_value() {
        let shares = vec![Share::from_u64(4, 13)];
        let secret = reconstruct_secret(&shares, 1, &gf17()).unwrap();
        assert_eq!(secret, BigUint::from(13u8));
    }

    #[test]
    fn polynomial_has_one_coefficient_per_share() {
        let field = gf17();
        let p = reconstruct_polynomial(
            &line_shares(),
            3,
            &field,
            &SelectionStrategy::First,
        )
        .unwrap();
        assert_eq!(p, poly![3, 2, 0]);
    }

    #[test]
    fn rejects_threshold_above_share_count() {
        let err = reconstruct_secret(&line_shares(), 4, &gf17()).unwrap_err();
        assert!(matches!(err, RecoveryError::InsufficientShares(4, 3)));
        assert!(err.is_config_error());
    }

    #[test]
    fn rejects_zero_threshold() {
        let err = reconstruct_secret(&line_shares(), 0, &gf17()).unwrap_err();
        assert!(matches!(err, RecoveryError::InvalidThreshold(0, 3)));
    }

    #[test]
    fn duplicate_x_surfaces_as_math_error() {
        let shares = vec![Share::from_u64(2, 7), Share::from_u64(2, 9)];
        let err = reconstruct_secret(&shares, 2, &gf17()).unwrap_err();
        assert!(matches!(
            err,
            RecoveryError::Math(MathError::NotInvertible { .. })
        ));
        assert!(err.is_degenerate());
    }
}
