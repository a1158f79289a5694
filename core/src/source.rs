//! Share documents.
//!
//! Three JSON layouts are understood:
//!
//! * canonical: `{"modulus", "threshold", "max_bad"?, "shares": [..]}` where
//!   every share is `{"x", "y"}` or `{"x", "base", "value"}`;
//! * token list: `{"tokens": [{"x", "y"}], "mod", "k", "maxBadTokens"}`;
//! * indexed: `{"keys": {"n", "k"}, "<x>": {"base", "value"}, ..}` over the
//!   default prime.
//!
//! [`ShareSet`] always serializes back to the canonical layout.

use std::{collections::BTreeMap, fs, path::Path};

use math::{MathError, PrimeField, DEFAULT_MODULUS};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{share::decimal, share::Share, traits::ShareSource};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read share document: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed share document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{value}` is not a valid base-{base} number")]
    InvalidNumber { value: String, base: u32 },
    #[error("unsupported base {0} (expected 2..=36)")]
    InvalidBase(String),
    #[error("share key `{0}` is not a non-negative integer")]
    InvalidShareKey(String),
    #[error("document declares {declared} shares but contains {found}")]
    ShareCountMismatch { declared: usize, found: usize },
    #[error("unrecognised share document layout")]
    UnknownLayout,
    #[error("invalid modulus: {0}")]
    Field(#[from] MathError),
}

/// Decode `value` written in `base` (2..=36, case-insensitive digits).
pub fn decode_value(value: &str, base: u32) -> Result<BigUint, SourceError> {
    if !(2..=36).contains(&base) {
        return Err(SourceError::InvalidBase(base.to_string()));
    }
    let digits = value.trim();
    let invalid = || SourceError::InvalidNumber {
        value: value.to_string(),
        base,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base)) {
        return Err(invalid());
    }
    BigUint::parse_bytes(digits.as_bytes(), base).ok_or_else(invalid)
}

fn parse_base(base: &BigUint) -> Result<u32, SourceError> {
    u32::try_from(base)
        .ok()
        .filter(|b| (2..=36).contains(b))
        .ok_or_else(|| SourceError::InvalidBase(base.to_string()))
}

/// `y` written in an arbitrary base.
#[derive(Debug, Deserialize)]
struct EncodedValue {
    #[serde(deserialize_with = "decimal::deserialize")]
    base: BigUint,
    value: String,
}

impl EncodedValue {
    fn decode(&self) -> Result<BigUint, SourceError> {
        decode_value(&self.value, parse_base(&self.base)?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ShareEntry {
    Encoded {
        #[serde(deserialize_with = "decimal::deserialize")]
        x: BigUint,
        #[serde(deserialize_with = "decimal::deserialize")]
        base: BigUint,
        value: String,
    },
    Plain(Share),
}

impl ShareEntry {
    fn into_share(self) -> Result<Share, SourceError> {
        match self {
            ShareEntry::Encoded { x, base, value } => {
                Ok(Share::new(x, decode_value(&value, parse_base(&base)?)?))
            }
            ShareEntry::Plain(share) => Ok(share),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CanonicalDocument {
    #[serde(deserialize_with = "decimal::deserialize")]
    modulus: BigUint,
    threshold: usize,
    #[serde(default)]
    max_bad: usize,
    shares: Vec<ShareEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenDocument {
    tokens: Vec<Share>,
    #[serde(rename = "mod", deserialize_with = "decimal::deserialize")]
    modulus: BigUint,
    k: usize,
    #[serde(default)]
    max_bad_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct IndexedKeys {
    n: usize,
    k: usize,
}

#[derive(Debug, Deserialize)]
struct IndexedDocument {
    keys: IndexedKeys,
    #[serde(flatten)]
    entries: BTreeMap<String, EncodedValue>,
}

/// A parsed share document: the shares plus the parameters to recover them
/// with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShareSet {
    pub modulus: PrimeField,
    pub threshold: usize,
    pub max_bad: usize,
    pub shares: Vec<Share>,
}

impl ShareSet {
    pub fn new(
        field: PrimeField,
        threshold: usize,
        max_bad: usize,
        shares: Vec<Share>,
    ) -> Self {
        Self {
            modulus: field,
            threshold,
            max_bad,
            shares,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path)?;
        Self::parse_document(&text)
    }

    /// Parse any of the supported layouts, chosen by its distinguishing key.
    pub fn parse_document(text: &str) -> Result<Self, SourceError> {
        let value: Value = serde_json::from_str(text)?;
        let object = value.as_object().ok_or(SourceError::UnknownLayout)?;

        if object.contains_key("shares") {
            Self::from_canonical(serde_json::from_value(value)?)
        } else if object.contains_key("tokens") {
            Self::from_tokens(serde_json::from_value(value)?)
        } else if object.contains_key("keys") {
            Self::from_indexed(serde_json::from_value(value)?)
        } else {
            Err(SourceError::UnknownLayout)
        }
    }

    fn from_canonical(doc: CanonicalDocument) -> Result<Self, SourceError> {
        let shares = doc
            .shares
            .into_iter()
            .map(ShareEntry::into_share)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(
            PrimeField::new(doc.modulus)?,
            doc.threshold,
            doc.max_bad,
            shares,
        ))
    }

    fn from_tokens(doc: TokenDocument) -> Result<Self, SourceError> {
        Ok(Self::new(
            PrimeField::new(doc.modulus)?,
            doc.k,
            doc.max_bad_tokens,
            doc.tokens,
        ))
    }

    fn from_indexed(doc: IndexedDocument) -> Result<Self, SourceError> {
        let mut indexed = doc
            .entries
            .iter()
            .map(|(key, encoded)| {
                let x = key
                    .parse::<u64>()
                    .map_err(|_| SourceError::InvalidShareKey(key.clone()))?;
                Ok((x, encoded.decode()?))
            })
            .collect::<Result<Vec<_>, SourceError>>()?;
        // keys sort as strings; order shares by their numeric x
        indexed.sort_by_key(|(x, _)| *x);

        if indexed.len() != doc.keys.n {
            return Err(SourceError::ShareCountMismatch {
                declared: doc.keys.n,
                found: indexed.len(),
            });
        }

        let shares = indexed
            .into_iter()
            .map(|(x, y)| Share::new(BigUint::from(x), y))
            .collect();
        let field: PrimeField = DEFAULT_MODULUS.parse()?;
        Ok(Self::new(field, doc.keys.k, 0, shares))
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_bad(mut self, max_bad: usize) -> Self {
        self.max_bad = max_bad;
        self
    }

    #[must_use]
    pub fn with_modulus(mut self, field: PrimeField) -> Self {
        self.modulus = field;
        self
    }

    /// Canonical JSON form of this set.
    pub fn to_json(&self) -> Result<String, SourceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ShareSource for ShareSet {
    fn shares(&self) -> &[Share] {
        &self.shares
    }

    fn field(&self) -> &PrimeField {
        &self.modulus
    }

    fn threshold(&self) -> usize {
        self.threshold
    }

    fn max_bad(&self) -> usize {
        self.max_bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod decode_value_tests {
        use super::*;

        #[test]
        fn decodes_common_bases() {
            assert_eq!(decode_value("111", 2).unwrap(), BigUint::from(7u8));
            assert_eq!(decode_value("4", 10).unwrap(), BigUint::from(4u8));
            assert_eq!(decode_value("213", 4).unwrap(), BigUint::from(39u8));
            let hex = BigUint::from(44759u32);
            assert_eq!(decode_value("aed7", 16).unwrap(), hex);
            assert_eq!(decode_value("AED7", 16).unwrap(), hex);
            assert_eq!(decode_value("zz", 36).unwrap(), BigUint::from(1295u32));
        }

        #[test]
        fn rejects_digits_outside_the_base() {
            assert!(matches!(
                decode_value("129", 8),
                Err(SourceError::InvalidNumber { base: 8, .. })
            ));
            assert!(decode_value("", 10).is_err());
            assert!(decode_value("-5", 10).is_err());
        }

        #[test]
        fn rejects_unsupported_bases() {
            assert!(matches!(
                decode_value("1", 1),
                Err(SourceError::InvalidBase(_))
            ));
            assert!(matches!(
                decode_value("1", 37),
                Err(SourceError::InvalidBase(_))
            ));
        }
    }

    mod parse_document_tests {
        use super::*;

        #[test]
        fn parses_canonical_document() {
            let set = ShareSet::parse_document(
                r#"{
                    "modulus": "17",
                    "threshold": 2,
                    "max_bad": 1,
                    "shares": [
                        {"x": "1", "y": "5"},
                        {"x": 2, "base": "2", "value": "111"},
                        {"x": "3", "base": 16, "value": "9"}
                    ]
                }"#,
            )
            .unwrap();
            assert_eq!(set.field().modulus(), &BigUint::from(17u8));
            assert_eq!(set.params().threshold, 2);
            assert_eq!(set.params().max_bad, 1);
            assert_eq!(
                set.shares,
                vec![
                    Share::from_u64(1, 5),
                    Share::from_u64(2, 7),
                    Share::from_u64(3, 9)
                ]
            );
        }

        #[test]
        fn parses_token_document() {
            let set = ShareSet::parse_document(
                r#"{
                    "tokens": [
                        {"x": 1, "y": 5}, {"x": 2, "y": 7},
                        {"x": 3, "y": 9}, {"x": 4, "y": 1}
                    ],
                    "mod": "17",
                    "k": 2,
                    "maxBadTokens": 1
                }"#,
            )
            .unwrap();
            assert_eq!(set.share_count(), 4);
            assert_eq!(set.threshold(), 2);
            assert_eq!(set.max_bad(), 1);
            assert_eq!(set.shares[3], Share::from_u64(4, 1));
        }

        #[test]
        fn token_values_may_exceed_u64() {
            let set = ShareSet::parse_document(
                r#"{
                    "tokens": [
                        {"x": 1, "y": 123456789012345678901234567890},
                        {"x": 2, "y": "7"}
                    ],
                    "mod": 1000000000000000000000000000000000000007,
                    "k": 2
                }"#,
            )
            .unwrap();
            assert_eq!(
                set.shares[0].y.to_string(),
                "123456789012345678901234567890"
            );
            assert_eq!(
                set.field().modulus().to_string(),
                "1000000000000000000000000000000000000007"
            );
        }

        #[test]
        fn canonical_entries_accept_large_numbers() {
            let set = ShareSet::parse_document(
                r#"{
                    "modulus": "1000000000000000000000000000000000000007",
                    "threshold": 1,
                    "shares": [
                        {"x": 18446744073709551617, "base": 10, "value": "5"},
                        {"x": 3, "y": 98765432109876543210987654321}
                    ]
                }"#,
            )
            .unwrap();
            assert_eq!(set.shares[0].x, BigUint::from(u64::MAX) + 2u8);
            assert_eq!(
                set.shares[1].y.to_string(),
                "98765432109876543210987654321"
            );
        }

        #[test]
        fn parses_indexed_document_in_numeric_order() {
            let set = ShareSet::parse_document(
                r#"{
                    "keys": {"n": 4, "k": 3},
                    "1": {"base": "10", "value": "4"},
                    "2": {"base": "2", "value": "111"},
                    "10": {"base": "4", "value": "213"},
                    "3": {"base": "10", "value": "12"}
                }"#,
            )
            .unwrap();
            let xs: Vec<_> =
                set.shares.iter().map(|s| s.x.to_string()).collect();
            assert_eq!(xs, ["1", "2", "3", "10"]);
            assert_eq!(set.shares[3].y, BigUint::from(39u8));
            assert_eq!(set.field(), &PrimeField::default_prime());
            assert_eq!(set.threshold(), 3);
            assert_eq!(set.max_bad(), 0);
        }

        #[test]
        fn indexed_document_inverts_any_x_difference() {
            // f(x) = 3 + 2x at points 23 apart
            let set = ShareSet::parse_document(
                r#"{
                    "keys": {"n": 4, "k": 2},
                    "1": {"base": "10", "value": "5"},
                    "24": {"base": "10", "value": "51"},
                    "47": {"base": "10", "value": "97"},
                    "70": {"base": "10", "value": "143"}
                }"#,
            )
            .unwrap();
            for i in 0..4 {
                for j in i + 1..4 {
                    let secret = crate::reconstruct_secret_with(
                        &set.shares,
                        2,
                        set.field(),
                        &crate::SelectionStrategy::Indices(vec![i, j]),
                    )
                    .unwrap();
                    assert_eq!(secret, BigUint::from(3u8), "pair {i},{j}");
                }
            }
            let pair = &set.shares[..2];
            assert_eq!(
                crate::reconstruct_secret(pair, 2, set.field()).unwrap(),
                BigUint::from(3u8)
            );
        }

        #[test]
        fn indexed_document_share_count_must_match() {
            let json = r#"{"keys": {"n": 3, "k": 2},
                "1": {"base": "10", "value": "4"}}"#;
            let err = ShareSet::parse_document(json).unwrap_err();
            assert!(matches!(
                err,
                SourceError::ShareCountMismatch {
                    declared: 3,
                    found: 1
                }
            ));
        }

        #[test]
        fn indexed_document_rejects_non_numeric_keys() {
            let json = r#"{"keys": {"n": 1, "k": 1},
                "a": {"base": "10", "value": "4"}}"#;
            let err = ShareSet::parse_document(json).unwrap_err();
            assert!(
                matches!(err, SourceError::InvalidShareKey(key) if key == "a")
            );
        }

        #[test]
        fn rejects_unknown_layouts_and_bad_moduli() {
            assert!(matches!(
                ShareSet::parse_document(r#"{"points": []}"#),
                Err(SourceError::UnknownLayout)
            ));
            assert!(matches!(
                ShareSet::parse_document("[1, 2]"),
                Err(SourceError::UnknownLayout)
            ));
            assert!(matches!(
                ShareSet::parse_document(
                    r#"{"modulus": "1", "threshold": 1, "shares": []}"#
                ),
                Err(SourceError::Field(MathError::InvalidModulus(_)))
            ));
            assert!(matches!(
                ShareSet::parse_document(r#"{"threshold": 1, "shares": []}"#),
                Err(SourceError::Json(_))
            ));
        }

        #[test]
        fn canonical_serialization_parses_back() {
            let set = ShareSet::new(
                PrimeField::from_u64(17).unwrap(),
                2,
                1,
                vec![Share::from_u64(1, 5), Share::from_u64(2, 7)],
            );
            let json = set.to_json().unwrap();
            assert!(json.contains(r#""modulus": "17""#));
            assert_eq!(ShareSet::parse_document(&json).unwrap(), set);
        }

        #[test]
        fn overrides_replace_document_values() {
            let set = ShareSet::new(
                PrimeField::from_u64(17).unwrap(),
                2,
                0,
                vec![Share::from_u64(1, 5)],
            )
            .with_threshold(1)
            .with_max_bad(3)
            .with_modulus(PrimeField::from_u64(19).unwrap());
            assert_eq!(set.params(), crate::ReconstructionParams::new(1, 3));
            assert_eq!(set.field().modulus(), &BigUint::from(19u8));
        }
    }
}
