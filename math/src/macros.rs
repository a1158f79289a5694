//! Shared macros for constructing core math primitives.
//!
//! These macros delegate to the types they create, which keeps test
//! fixtures concise and avoids spelling out `BigUint::from` everywhere.

/// Simplifies constructing field elements (`BigUint`) from integer literals.
///
/// The value is not reduced; pass it through a field to canonicalise it.
///
/// ```
/// use math::prelude::*;
///
/// let a = fe!(42);
/// assert_eq!(a, BigUint::from(42u64));
/// ```
#[macro_export]
macro_rules! fe {
    ($value:expr) => {
        $crate::num_bigint::BigUint::from(($value) as u64)
    };
}

/// Create a [`Vec`] of field elements.
///
/// ```
/// use math::prelude::*;
///
/// assert_eq!(fe_vec![7; 3], vec![fe!(7); 3]);
/// assert_eq!(fe_vec![1, 2], vec![fe!(1), fe!(2)]);
/// ```
#[macro_export]
macro_rules! fe_vec {
    ($b:expr; $n:expr) => {
        vec![$crate::fe!($b); $n]
    };
    ($($b:expr),* $(,)?) => {
        vec![$($crate::fe!($b)),*]
    };
}

/// Construct a [`Polynomial`](crate::poly::Polynomial) from coefficients in
/// ascending degree order.
///
/// ```
/// use math::prelude::*;
///
/// let p = poly![3, 2];
/// let field = PrimeField::from_u64(17).unwrap();
/// assert_eq!(p.evaluate(&fe!(1), &field), fe!(5));
/// ```
#[macro_export]
macro_rules! poly {
    () => {{
        $crate::poly::Polynomial::<$crate::num_bigint::BigUint>::zero()
    }};
    ($($coeff:expr),+ $(,)?) => {{
        $crate::poly::Polynomial::from($crate::fe_vec![$($coeff),+])
    }};
}
