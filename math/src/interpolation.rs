//! Lagrange interpolation over a finite field.
//!
//! Given `k` points with pairwise distinct x-coordinates, there is exactly one
//! polynomial of degree at most `k - 1` through them:
//!
//! ```text
//! f(x) = Σ_i y_i · L_i(x),   L_i(x) = Π_{j≠i} (x - x_j) / Π_{j≠i} (x_i - x_j)
//! ```
//!
//! Two forms are offered. [`lagrange_polynomial`] materialises every
//! coefficient of `f` and costs O(k²) multiplications per basis polynomial.
//! [`lagrange_at_zero`] only computes `f(0)`, the shared secret, with scalar
//! products. Both agree on the constant term.
//!
//! A repeated x-coordinate (modulo the field) makes one of the denominators
//! zero; every entry point then returns [`MathError::NotInvertible`].

use crate::error::{MathError, Result};
use crate::poly::Polynomial;
use crate::traits::{FiniteField, Point};

/// Coefficient form: the unique interpolant through `points`, as a
/// `points.len()`-long coefficient vector.
pub fn lagrange_polynomial<F, P>(
    points: &[P],
    field: &F,
) -> Result<Polynomial<F::Element>>
where
    F: FiniteField,
    P: Point<F::Element>,
{
    if points.is_empty() {
        return Err(MathError::EmptyInput);
    }

    let mut total = Polynomial::new(vec![field.zero(); points.len()]);

    for (i, point_i) in points.iter().enumerate() {
        let xi = point_i.x();
        let mut basis = Polynomial::constant(field.one());
        let mut denominator = field.one();

        for (j, point_j) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let xj = point_j.x();
            basis = basis.multiply(&Polynomial::linear_root(xj, field), field);
            denominator = field.mul(&denominator, &field.sub(xi, xj));
        }

        let weight = field.mul(point_i.y(), &field.inverse(&denominator)?);
        total.add_scaled(&basis, &weight, field);
    }

    Ok(total)
}

/// The Lagrange basis values `L_i(x)` for every point.
///
/// For `x = 0` these are the familiar reconstruction coefficients λ_i, which
/// always sum to one.
pub fn lagrange_basis_at<F, P>(
    points: &[P],
    x: &F::Element,
    field: &F,
) -> Result<Vec<F::Element>>
where
    F: FiniteField,
    P: Point<F::Element>,
{
    if points.is_empty() {
        return Err(MathError::EmptyInput);
    }

    let mut numerators = Vec::with_capacity(points.len());
    let mut denominators = Vec::with_capacity(points.len());

    for (i, point_i) in points.iter().enumerate() {
        let xi = point_i.x();
        let mut numerator = field.one();
        let mut denominator = field.one();
        for (j, point_j) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let xj = point_j.x();
            numerator = field.mul(&numerator, &field.sub(x, xj));
            denominator = field.mul(&denominator, &field.sub(xi, xj));
        }
        numerators.push(numerator);
        denominators.push(denominator);
    }

    let inverses = field.batch_inverse(&denominators)?;
    Ok(numerators
        .iter()
        .zip(&inverses)
        .map(|(num, inv)| field.mul(num, inv))
        .collect())
}

/// Evaluate the interpolant through `points` at `x` without building its
/// coefficients.
pub fn lagrange_at<F, P>(
    points: &[P],
    x: &F::Element,
    field: &F,
) -> Result<F::Element>
where
    F: FiniteField,
    P: Point<F::Element>,
{
    let basis = lagrange_basis_at(points, x, field)?;
    Ok(points
        .iter()
        .zip(&basis)
        .fold(field.zero(), |acc, (point, lambda)| {
            field.add(&acc, &field.mul(point.y(), lambda))
        }))
}

/// Value-at-zero form: `f(0)`, the secret, from the scalar numerators
/// `Π_{j≠i} (-x_j)`.
pub fn lagrange_at_zero<F, P>(points: &[P], field: &F) -> Result<F::Element>
where
    F: FiniteField,
    P: Point<F::Element>,
{
    lagrange_at(points, &field.zero(), field)
}

/// The reconstruction coefficients λ_i = L_i(0).
pub fn lagrange_basis_at_zero<F, P>(
    points: &[P],
    field: &F,
) -> Result<Vec<F::Element>>
where
    F: FiniteField,
    P: Point<F::Element>,
{
    lagrange_basis_at(points, &field.zero(), field)
}
