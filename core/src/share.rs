use std::collections::HashMap;

use math::{traits::FiniteField, Point, Polynomial, PrimeField};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{RecoveryError, RecoveryResult};

/// One evaluation `(x, f(x))` of the sharing polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Share {
    #[serde(with = "decimal")]
    pub x: BigUint,
    #[serde(with = "decimal")]
    pub y: BigUint,
}

impl Share {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self { x, y }
    }

    pub fn from_u64(x: u64, y: u64) -> Self {
        Self::new(BigUint::from(x), BigUint::from(y))
    }

    /// Both coordinates reduced into `[0, p)`.
    #[must_use]
    pub fn reduced(&self, field: &PrimeField) -> Self {
        Self::new(field.reduce(&self.x), field.reduce(&self.y))
    }

    /// Whether `polynomial(x) ≡ y (mod p)`.
    pub fn matches(
        &self,
        polynomial: &Polynomial<BigUint>,
        field: &PrimeField,
    ) -> bool {
        polynomial.evaluate(&self.x, field) == field.reduce(&self.y)
    }
}

impl Point<BigUint> for Share {
    fn x(&self) -> &BigUint {
        &self.x
    }

    fn y(&self) -> &BigUint {
        &self.y
    }
}

impl From<(u64, u64)> for Share {
    fn from((x, y): (u64, u64)) -> Self {
        Self::from_u64(x, y)
    }
}

/// Fail with the first pair of shares whose x-coordinates coincide
/// modulo `p`.
pub fn ensure_distinct_x(
    shares: &[Share],
    field: &PrimeField,
) -> RecoveryResult<()> {
    let mut seen: HashMap<BigUint, usize> =
        HashMap::with_capacity(shares.len());
    for (index, share) in shares.iter().enumerate() {
        let x = field.reduce(&share.x);
        if let Some(&first) = seen.get(&x) {
            return Err(RecoveryError::DuplicateX {
                first,
                second: index,
                x,
            });
        }
        seen.insert(x, index);
    }
    Ok(())
}

/// Big integers travel as decimal strings; plain JSON numbers of any size are
/// accepted on input.
pub(crate) mod decimal {
    use std::fmt;

    use num_bigint::BigUint;
    use serde::de::{self, MapAccess, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(
        value: &BigUint,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = BigUint;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigUint, E> {
            Ok(BigUint::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigUint, E> {
            u64::try_from(v)
                .map(BigUint::from)
                .map_err(|_| E::custom(format!("negative value {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<BigUint, E> {
            let digits = v.trim();
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(E::custom(format!("invalid decimal {v:?}")));
            }
            BigUint::parse_bytes(digits.as_bytes(), 10)
                .ok_or_else(|| E::custom(format!("invalid decimal {v:?}")))
        }

        // with arbitrary precision, serde_json hands over a number as a
        // single-entry map holding its literal text
        fn visit_map<A>(self, mut map: A) -> Result<BigUint, A::Error>
        where
            A: MapAccess<'de>,
        {
            let Some((_, literal)) = map.next_entry::<String, String>()? else {
                return Err(de::Error::invalid_length(0, &self));
            };
            self.visit_str(&literal)
        }
    }
}
