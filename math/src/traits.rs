use std::fmt::Debug;

use crate::error::Result;

/// Arithmetic over a finite field whose parameters are only known at runtime.
///
/// Elements are plain values; the field instance carries the modulus and
/// every operation reduces its result into canonical form.
pub trait FiniteField: Debug + Clone + Send + Sync {
    type Element: Clone + Debug + Eq + Send + Sync;

    fn zero(&self) -> Self::Element;

    fn one(&self) -> Self::Element;

    /// Map an arbitrary representative onto its canonical form.
    fn reduce(&self, value: &Self::Element) -> Self::Element;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn neg(&self, a: &Self::Element) -> Self::Element;

    /// Multiplicative inverse, failing when `a` shares a factor with the
    /// modulus (always the case for zero).
    fn inverse(&self, a: &Self::Element) -> Result<Self::Element>;

    fn is_zero(&self, a: &Self::Element) -> bool {
        self.reduce(a) == self.zero()
    }

    fn div(
        &self,
        a: &Self::Element,
        b: &Self::Element,
    ) -> Result<Self::Element> {
        Ok(self.mul(a, &self.inverse(b)?))
    }

    /// Montgomery batch inversion: one field inversion for the whole slice.
    ///
    /// Fails if any input is not invertible. Adapted from
    /// <https://paulmillr.com/posts/noble-secp256k1-fast-ecc/#batch-inversion>.
    fn batch_inverse(
        &self,
        values: &[Self::Element],
    ) -> Result<Vec<Self::Element>> {
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let mut prefixes = Vec::with_capacity(values.len());
        let mut acc = self.one();
        for value in values {
            prefixes.push(acc.clone());
            acc = self.mul(&acc, value);
        }

        let mut acc = self.inverse(&acc)?;
        let mut inverses = vec![self.zero(); values.len()];
        for (idx, value) in values.iter().enumerate().rev() {
            inverses[idx] = self.mul(&acc, &prefixes[idx]);
            acc = self.mul(&acc, value);
        }

        Ok(inverses)
    }
}

/// A sample point `(x, y)` consumed by interpolation.
pub trait Point<E> {
    fn x(&self) -> &E;

    fn y(&self) -> &E;
}

impl<E> Point<E> for (E, E) {
    fn x(&self) -> &E {
        &self.0
    }

    fn y(&self) -> &E {
        &self.1
    }
}

impl<E, P: Point<E> + ?Sized> Point<E> for &P {
    fn x(&self) -> &E {
        (**self).x()
    }

    fn y(&self) -> &E {
        (**self).y()
    }
}
