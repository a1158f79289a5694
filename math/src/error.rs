use num_bigint::BigUint;
use thiserror::Error;

/// Common result type used across this crate.
pub type Result<T, E = MathError> = core::result::Result<T, E>;

/// Top-level error type to keep error management simple for users.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum MathError {
    #[error("modulus must be at least 2, got {0}")]
    InvalidModulus(BigUint),
    #[error("{value} has no multiplicative inverse modulo {modulus}")]
    NotInvertible { value: BigUint, modulus: BigUint },
    #[error("interpolation requires at least one point")]
    EmptyInput,
    #[error(transparent)]
    ParseElement(#[from] ParseFieldElementError),
}

pub type Error = MathError;

impl MathError {
    /// Whether the error stems from a zero (or non-coprime) denominator,
    /// i.e. two points sharing an x-coordinate modulo the field.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, MathError::NotInvertible { .. })
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseFieldElementError {
    #[error("invalid decimal integer `{0}`")]
    InvalidDigits(String),
    #[error("non-canonical {value} >= modulus {modulus}")]
    NotCanonical { value: BigUint, modulus: BigUint },
}
