use std::{fmt, str::FromStr};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::error::{RecoveryError, RecoveryResult};

/// How the trusting path picks its `k` shares.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// The first `k` shares in input order.
    #[default]
    First,
    /// Exactly these share indices, in this order.
    Indices(Vec<usize>),
    /// A reproducible shuffle of all indices, truncated to `k`.
    Seeded(u64),
}

impl SelectionStrategy {
    /// Indices of the shares to interpolate, given `n` available shares and
    /// threshold `k`. The caller has already checked `1 <= k <= n`.
    pub fn select(&self, n: usize, k: usize) -> RecoveryResult<Vec<usize>> {
        match self {
            SelectionStrategy::First => Ok((0..k).collect()),
            SelectionStrategy::Indices(indices) => {
                if indices.len() != k {
                    return Err(RecoveryError::SelectionSize {
                        expected: k,
                        found: indices.len(),
                    });
                }
                let mut seen = vec![false; n];
                for &index in indices {
                    if index >= n {
                        return Err(RecoveryError::InvalidIndex(index, n));
                    }
                    if seen[index] {
                        return Err(RecoveryError::RepeatedIndex(index));
                    }
                    seen[index] = true;
                }
                Ok(indices.clone())
            }
            SelectionStrategy::Seeded(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                let mut order: Vec<usize> = (0..n).collect();
                order.shuffle(&mut rng);
                order.truncate(k);
                Ok(order)
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSelectionError {
    #[error("unknown selection strategy {0:?}")]
    UnknownStrategy(String),
    #[error("invalid seed {0:?}")]
    InvalidSeed(String),
    #[error("invalid share index {0:?}")]
    InvalidIndex(String),
}

impl FromStr for SelectionStrategy {
    type Err = ParseSelectionError;

    /// `first`, `seeded:<u64>` or `indices:<i>,<j>,...`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("first") {
            return Ok(SelectionStrategy::First);
        }
        match s.split_once(':') {
            Some((name, seed)) if name.eq_ignore_ascii_case("seeded") => seed
                .trim()
                .parse()
                .map(SelectionStrategy::Seeded)
                .map_err(|_| ParseSelectionError::InvalidSeed(seed.into())),
            Some((name, list)) if name.eq_ignore_ascii_case("indices") => list
                .split(',')
                .map(|item| {
                    item.trim().parse::<usize>().map_err(|_| {
                        ParseSelectionError::InvalidIndex(item.into())
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(SelectionStrategy::Indices),
            _ => Err(ParseSelectionError::UnknownStrategy(s.into())),
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectionStrategy::First => write!(f, "first"),
            SelectionStrategy::Seeded(seed) => write!(f, "seeded:{seed}"),
            SelectionStrategy::Indices(indices) => {
                write!(f, "indices:")?;
                for (i, index) in indices.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{index}")?;
                }
                Ok(())
            }
        }
    }
}
