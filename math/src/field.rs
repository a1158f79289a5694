use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MathError, ParseFieldElementError, Result};
use crate::traits::FiniteField;

/// Prime used by the indexed share documents when they carry no modulus:
/// the first prime above 10^65, which is 10^65 + 49.
pub const DEFAULT_MODULUS: &str =
    "100000000000000000000000000000000000000000000000000000000000000049";

/// The prime field ℤ_p for an arbitrary-precision modulus `p`.
///
/// Primality is assumed, not verified. With a composite modulus everything
/// but [`FiniteField::inverse`] still works; inversion then fails for every
/// value sharing a factor with `p`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    /// Construct the field, rejecting moduli below 2.
    pub fn new(modulus: BigUint) -> Result<Self> {
        if modulus < BigUint::from(2u8) {
            return Err(MathError::InvalidModulus(modulus));
        }
        Ok(Self { modulus })
    }

    pub fn from_u64(modulus: u64) -> Result<Self> {
        Self::new(BigUint::from(modulus))
    }

    /// The field used by legacy share documents, see [`DEFAULT_MODULUS`].
    pub fn default_prime() -> Self {
        Self {
            modulus: DEFAULT_MODULUS
                .parse()
                .expect("DEFAULT_MODULUS is a valid decimal literal"),
        }
    }

    #[inline]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Lift a machine integer into the field.
    #[inline]
    pub fn element(&self, value: u64) -> BigUint {
        BigUint::from(value) % &self.modulus
    }

    /// Reduce a signed integer into `[0, p)`.
    pub fn reduce_signed(&self, value: &BigInt) -> BigUint {
        let modulus = BigInt::from_biguint(Sign::Plus, self.modulus.clone());
        let reduced = ((value % &modulus) + &modulus) % &modulus;
        reduced.into_parts().1
    }

    /// Parse a decimal string as a canonical element (`< p`).
    pub fn parse_element(&self, text: &str) -> Result<BigUint> {
        let value = parse_decimal(text)?;
        if value >= self.modulus {
            return Err(ParseFieldElementError::NotCanonical {
                value,
                modulus: self.modulus.clone(),
            }
            .into());
        }
        Ok(value)
    }

    #[must_use]
    pub fn pow(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        base.modpow(exp, &self.modulus)
    }

    #[inline]
    pub fn is_canonical(&self, value: &BigUint) -> bool {
        value < &self.modulus
    }
}

impl FiniteField for PrimeField {
    type Element = BigUint;

    #[inline]
    fn zero(&self) -> BigUint {
        BigUint::zero()
    }

    #[inline]
    fn one(&self) -> BigUint {
        // p >= 2, so 1 is already canonical
        BigUint::one()
    }

    #[inline]
    fn reduce(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = a % &self.modulus;
        let b = b % &self.modulus;
        if a >= b {
            a - b
        } else {
            a + &self.modulus - b
        }
    }

    fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    fn neg(&self, a: &BigUint) -> BigUint {
        let a = a % &self.modulus;
        if a.is_zero() {
            a
        } else {
            &self.modulus - a
        }
    }

    fn inverse(&self, a: &BigUint) -> Result<BigUint> {
        mod_inverse(a, &self.modulus)
    }
}

/// Multiplicative inverse of `a` modulo `modulus` by the extended Euclidean
/// algorithm.
///
/// Returns [`MathError::NotInvertible`] unless `gcd(a, modulus) == 1`, which
/// covers `a ≡ 0`.
pub fn mod_inverse(a: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus < &BigUint::from(2u8) {
        return Err(MathError::InvalidModulus(modulus.clone()));
    }

    let m = BigInt::from_biguint(Sign::Plus, modulus.clone());
    let (mut old_r, mut r) =
        (BigInt::from_biguint(Sign::Plus, a % modulus), m.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    // old_r is now gcd(a, modulus)
    if !old_r.is_one() {
        return Err(MathError::NotInvertible {
            value: a % modulus,
            modulus: modulus.clone(),
        });
    }

    let inverse = ((old_s % &m) + &m) % &m;
    Ok(inverse.into_parts().1)
}

fn parse_decimal(text: &str) -> Result<BigUint, ParseFieldElementError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseFieldElementError::InvalidDigits(text.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| ParseFieldElementError::InvalidDigits(text.to_string()))
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GF({})", self.modulus)
    }
}

impl FromStr for PrimeField {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_decimal(s)?)
    }
}

impl Serialize for PrimeField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.modulus.to_str_radix(10).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PrimeField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
