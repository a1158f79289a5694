//! Finite-field arithmetic, dense polynomials and Lagrange interpolation
//! over arbitrary-precision prime moduli.

pub mod error;
pub mod field;
pub mod interpolation;
pub mod macros;
pub mod poly;
pub mod prelude;
pub mod traits;

pub use num_bigint;

pub use crate::{
    error::{MathError, Result},
    field::{mod_inverse, PrimeField, DEFAULT_MODULUS},
    interpolation::{lagrange_at_zero, lagrange_polynomial},
    poly::Polynomial,
    traits::{FiniteField, Point},
};
