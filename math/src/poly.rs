//! Dense univariate polynomials over a runtime-parameterised finite field.
//!
//! Coefficients are stored in ascending degree order: index `i` holds the
//! coefficient of `x^i`, so the constant term (the shared secret) sits at
//! index 0. The polynomial does not carry its field; every operation takes
//! the field explicitly and reduces as it goes.

use std::fmt;

use num_bigint::BigUint;

use crate::traits::FiniteField;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Polynomial<E = BigUint> {
    coefficients: Vec<E>,
}

impl<E> Polynomial<E> {
    pub fn new(coefficients: Vec<E>) -> Self {
        Self { coefficients }
    }

    /// The empty coefficient vector, which evaluates to zero everywhere.
    pub fn zero() -> Self {
        Self {
            coefficients: Vec::new(),
        }
    }

    pub fn coefficients(&self) -> &[E] {
        &self.coefficients
    }

    pub fn into_coefficients(self) -> Vec<E> {
        self.coefficients
    }

    /// Number of stored coefficients (`k` for an interpolant through `k`
    /// points), independent of trailing zeros.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn constant_term(&self) -> Option<&E> {
        self.coefficients.first()
    }
}

impl<E: Clone + Eq> Polynomial<E> {
    pub fn constant(value: E) -> Self {
        Self {
            coefficients: vec![value],
        }
    }

    /// The monic linear factor `(x - root)`.
    pub fn linear_root<F>(root: &E, field: &F) -> Self
    where
        F: FiniteField<Element = E>,
    {
        Self {
            coefficients: vec![field.neg(root), field.one()],
        }
    }

    /// Degree ignoring trailing zero coefficients; `None` for the zero
    /// polynomial.
    pub fn degree<F>(&self, field: &F) -> Option<usize>
    where
        F: FiniteField<Element = E>,
    {
        self.coefficients.iter().rposition(|c| !field.is_zero(c))
    }

    /// Schoolbook product. The result has `len(a) + len(b) - 1`
    /// coefficients, or none if either operand is empty.
    pub fn multiply<F>(&self, other: &Self, field: &F) -> Self
    where
        F: FiniteField<Element = E>,
    {
        if self.is_empty() || other.is_empty() {
            return Self::zero();
        }

        let mut product = vec![field.zero(); self.len() + other.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                product[i + j] = field.add(&product[i + j], &field.mul(a, b));
            }
        }

        Self::new(product)
    }

    /// Evaluate at `x` with Horner's rule, reducing after every step.
    pub fn evaluate<F>(&self, x: &E, field: &F) -> E
    where
        F: FiniteField<Element = E>,
    {
        self.coefficients
            .iter()
            .rev()
            .fold(field.zero(), |acc, coeff| {
                field.add(&field.mul(&acc, x), coeff)
            })
    }

    pub fn batch_evaluate<F>(&self, xs: &[E], field: &F) -> Vec<E>
    where
        F: FiniteField<Element = E>,
    {
        xs.iter().map(|x| self.evaluate(x, field)).collect()
    }

    #[must_use]
    pub fn scale<F>(&self, scalar: &E, field: &F) -> Self
    where
        F: FiniteField<Element = E>,
    {
        Self::new(
            self.coefficients
                .iter()
                .map(|c| field.mul(c, scalar))
                .collect(),
        )
    }

    /// `self += scalar * other`, growing `self` to the longer length.
    pub fn add_scaled<F>(&mut self, other: &Self, scalar: &E, field: &F)
    where
        F: FiniteField<Element = E>,
    {
        if self.len() < other.len() {
            self.coefficients.resize(other.len(), field.zero());
        }
        for (acc, c) in self.coefficients.iter_mut().zip(&other.coefficients)
        {
            *acc = field.add(acc, &field.mul(c, scalar));
        }
    }

    /// Reduce every coefficient into canonical form.
    #[must_use]
    pub fn reduced<F>(&self, field: &F) -> Self
    where
        F: FiniteField<Element = E>,
    {
        Self::new(self.coefficients.iter().map(|c| field.reduce(c)).collect())
    }
}

impl<E> From<Vec<E>> for Polynomial<E> {
    fn from(coefficients: Vec<E>) -> Self {
        Self::new(coefficients)
    }
}

impl<E: fmt::Display> fmt::Display for Polynomial<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficients.is_empty() {
            return write!(f, "0");
        }
        for (i, coeff) in self.coefficients.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            match i {
                0 => write!(f, "{coeff}")?,
                1 => write!(f, "{coeff}·x")?,
                _ => write!(f, "{coeff}·x^{i}")?,
            }
        }
        Ok(())
    }
}
