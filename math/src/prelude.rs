pub use num_bigint::BigUint;
pub use num_traits::{One, Zero};

pub use crate::field::PrimeField;
pub use crate::interpolation::{
    lagrange_at, lagrange_at_zero, lagrange_basis_at_zero, lagrange_polynomial,
};
pub use crate::poly::Polynomial;
pub use crate::traits::{FiniteField, Point};
pub use crate::{fe, fe_vec, poly};
