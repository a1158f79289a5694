//! Error-tolerant reconstruction.
//!
//! When up to `maxBad` of the `n` shares may be corrupted, the reconstructor
//! interpolates every `k`-subset in lexicographic order and accepts the
//! first polynomial that agrees with at least `n - maxBad` shares. Subsets
//! with colliding x-coordinates are skipped. The search costs `C(n, k)`
//! interpolations in the worst case and is only practical for small `n`.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use math::{interpolation::lagrange_polynomial, Polynomial, PrimeField};
use num_bigint::BigUint;
use rayon::prelude::*;

use crate::{
    combinations::{binomial, Combinations},
    error::RecoveryResult,
    params::ReconstructionParams,
    share::Share,
    traits::ShareSource,
};

/// Shared flag that stops a running search at the next candidate (or batch,
/// in parallel mode).
pub type CancelFlag = Arc<AtomicBool>;

pub const DEFAULT_BATCH_SIZE: usize = 1024;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Sequential,
    /// Evaluate `batch_size` consecutive subsets at a time on the rayon pool.
    Parallel { batch_size: usize },
}

#[derive(Clone, Debug, Default)]
pub struct SearchOptions {
    pub mode: SearchMode,
    /// Stop with [`SearchOutcome::Cancelled`] after this many subsets.
    pub max_candidates: Option<u64>,
    pub cancel: Option<CancelFlag>,
}

impl SearchOptions {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn parallel(batch_size: usize) -> Self {
        Self {
            mode: SearchMode::Parallel {
                batch_size: batch_size.max(1),
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_candidates(mut self, max_candidates: u64) -> Self {
        self.max_candidates = Some(max_candidates);
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn should_stop(&self, examined: u64) -> bool {
        let cancelled = self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        let over_budget =
            self.max_candidates.is_some_and(|limit| examined >= limit);
        cancelled || over_budget
    }

    fn remaining(&self, examined: u64) -> Option<u64> {
        self.max_candidates
            .map(|limit| limit.saturating_sub(examined))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Searching,
    Found,
    Exhausted,
    Cancelled,
}

/// Counters collected while walking the subsets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchReport {
    /// Subsets interpolated (degenerate ones included).
    pub examined: u64,
    /// Subsets skipped because two shares shared an x-coordinate.
    pub degenerate: u64,
    /// Highest agreement count of any interpolated candidate.
    pub best_matches: usize,
    /// `C(n, k)`, when it fits in a `u128`.
    pub total: Option<u128>,
}

impl SearchReport {
    fn record(&mut self, candidate: &Candidate) {
        self.examined += 1;
        match candidate {
            Candidate::Degenerate => self.degenerate += 1,
            Candidate::Rejected { matches }
            | Candidate::Accepted { matches, .. } => {
                self.best_matches = self.best_matches.max(*matches);
            }
        }
    }
}

/// A polynomial consistent with all but at most `maxBad` shares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recovered {
    /// `k` coefficients in ascending degree order.
    pub polynomial: Polynomial<BigUint>,
    pub secret: BigUint,
    /// The subset the polynomial was interpolated from.
    pub indices: Vec<usize>,
    /// Shares agreeing with the polynomial (the subset included).
    pub matches: usize,
    /// Indices of the shares that disagree, i.e. the corrupted ones.
    pub outliers: Vec<usize>,
    pub report: SearchReport,
}

impl Recovered {
    pub fn inconsistent_shares(&self) -> &[usize] {
        &self.outliers
    }

    pub fn consistent_shares(&self, share_count: usize) -> Vec<usize> {
        (0..share_count)
            .filter(|i| self.outliers.binary_search(i).is_err())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Recovered),
    /// Every subset was tried and none had enough support.
    Exhausted(SearchReport),
    /// The cancel flag or the candidate budget stopped the search.
    Cancelled(SearchReport),
}

impl SearchOutcome {
    pub fn state(&self) -> SearchState {
        match self {
            SearchOutcome::Found(_) => SearchState::Found,
            SearchOutcome::Exhausted(_) => SearchState::Exhausted,
            SearchOutcome::Cancelled(_) => SearchState::Cancelled,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn found(&self) -> Option<&Recovered> {
        match self {
            SearchOutcome::Found(recovered) => Some(recovered),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<Recovered> {
        match self {
            SearchOutcome::Found(recovered) => Some(recovered),
            _ => None,
        }
    }

    pub fn secret(&self) -> Option<&BigUint> {
        self.found().map(|recovered| &recovered.secret)
    }

    pub fn report(&self) -> &SearchReport {
        match self {
            SearchOutcome::Found(recovered) => &recovered.report,
            SearchOutcome::Exhausted(report)
            | SearchOutcome::Cancelled(report) => report,
        }
    }
}

enum Candidate {
    Accepted {
        polynomial: Polynomial<BigUint>,
        matches: usize,
        outliers: Vec<usize>,
    },
    Rejected {
        matches: usize,
    },
    Degenerate,
}

/// Interpolate one subset and count how many shares agree with it.
fn evaluate_candidate(
    shares: &[Share],
    indices: &[usize],
    field: &PrimeField,
    required: usize,
) -> RecoveryResult<Candidate> {
    let subset: Vec<&Share> = indices.iter().map(|&i| &shares[i]).collect();
    let polynomial = match lagrange_polynomial(&subset, field) {
        Ok(polynomial) => polynomial,
        Err(err) if err.is_degenerate() => return Ok(Candidate::Degenerate),
        Err(err) => return Err(err.into()),
    };

    let outliers: Vec<usize> = shares
        .iter()
        .enumerate()
        .filter(|(_, share)| !share.matches(&polynomial, field))
        .map(|(i, _)| i)
        .collect();
    let matches = shares.len() - outliers.len();

    if matches >= required {
        Ok(Candidate::Accepted {
            polynomial,
            matches,
            outliers,
        })
    } else {
        Ok(Candidate::Rejected { matches })
    }
}

#[derive(Clone, Debug)]
pub struct RobustReconstructor {
    field: PrimeField,
    params: ReconstructionParams,
    options: SearchOptions,
    state: SearchState,
}

impl RobustReconstructor {
    pub fn new(field: PrimeField, params: ReconstructionParams) -> Self {
        Self {
            field,
            params,
            options: SearchOptions::default(),
            state: SearchState::Searching,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn params(&self) -> ReconstructionParams {
        self.params
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// State of the most recent search; `Searching` until one finishes.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Walk the `k`-subsets of `shares` until one interpolates to a
    /// polynomial with at least `n - maxBad` supporting shares.
    ///
    /// Only configuration problems are errors; running out of subsets is
    /// [`SearchOutcome::Exhausted`].
    pub fn search(
        &mut self,
        shares: &[Share],
    ) -> RecoveryResult<SearchOutcome> {
        let n = shares.len();
        self.params.validate(n)?;
        self.state = SearchState::Searching;

        let k = self.params.threshold;
        let report = SearchReport {
            total: binomial(n, k),
            ..SearchReport::default()
        };

        let outcome = match self.options.mode {
            SearchMode::Sequential => self.search_sequential(shares, report)?,
            SearchMode::Parallel { batch_size } => {
                self.search_parallel(shares, batch_size, report)?
            }
        };
        self.state = outcome.state();
        Ok(outcome)
    }

    fn search_sequential(
        &self,
        shares: &[Share],
        mut report: SearchReport,
    ) -> RecoveryResult<SearchOutcome> {
        let required = self.params.required_matches(shares.len());

        for indices in Combinations::new(shares.len(), self.params.threshold) {
            if self.options.should_stop(report.examined) {
                return Ok(SearchOutcome::Cancelled(report));
            }
            let candidate =
                evaluate_candidate(shares, &indices, &self.field, required)?;
            report.record(&candidate);
            if let Some(found) = accept(candidate, indices, &report) {
                return Ok(found);
            }
        }

        Ok(SearchOutcome::Exhausted(report))
    }

    /// Batches are drawn in enumeration order and scanned in that order
    /// after evaluation, so the result matches the sequential search.
    fn search_parallel(
        &self,
        shares: &[Share],
        batch_size: usize,
        mut report: SearchReport,
    ) -> RecoveryResult<SearchOutcome> {
        let required = self.params.required_matches(shares.len());
        let mut combinations =
            Combinations::new(shares.len(), self.params.threshold).peekable();

        loop {
            if combinations.peek().is_none() {
                return Ok(SearchOutcome::Exhausted(report));
            }
            if self.options.should_stop(report.examined) {
                return Ok(SearchOutcome::Cancelled(report));
            }

            let mut limit = batch_size.max(1);
            if let Some(remaining) = self.options.remaining(report.examined) {
                limit = limit.min(usize::try_from(remaining).unwrap_or(limit));
            }
            let batch: Vec<Vec<usize>> =
                combinations.by_ref().take(limit).collect();

            let results: Vec<RecoveryResult<Candidate>> = batch
                .par_iter()
                .map(|indices| {
                    evaluate_candidate(shares, indices, &self.field, required)
                })
                .collect();

            for (indices, result) in batch.into_iter().zip(results) {
                let candidate = result?;
                report.record(&candidate);
                if let Some(found) = accept(candidate, indices, &report) {
                    return Ok(found);
                }
            }
        }
    }
}

fn accept(
    candidate: Candidate,
    indices: Vec<usize>,
    report: &SearchReport,
) -> Option<SearchOutcome> {
    match candidate {
        Candidate::Accepted {
            polynomial,
            matches,
            outliers,
        } => {
            let secret =
                polynomial.constant_term().cloned().unwrap_or_default();
            Some(SearchOutcome::Found(Recovered {
                polynomial,
                secret,
                indices,
                matches,
                outliers,
                report: report.clone(),
            }))
        }
        Candidate::Rejected { .. } | Candidate::Degenerate => None,
    }
}

/// Sequential robust reconstruction with default options.
pub fn reconstruct_robust(
    shares: &[Share],
    threshold: usize,
    field: &PrimeField,
    max_bad: usize,
) -> RecoveryResult<SearchOutcome> {
    RobustReconstructor::new(
        field.clone(),
        ReconstructionParams::new(threshold, max_bad),
    )
    .search(shares)
}

/// Robust reconstruction driven by a [`ShareSource`].
pub fn reconstruct_robust_source<S: ShareSource>(
    source: &S,
    options: SearchOptions,
) -> RecoveryResult<SearchOutcome> {
    RobustReconstructor::new(source.field().clone(), source.params())
        .with_options(options)
        .search(source.shares())
}
