//! Shamir secret reconstruction over a prime field.
//!
//! [`reconstruct_secret`] trusts its shares and interpolates `f(0)` from `k`
//! of them. [`reconstruct_robust`] tolerates up to `maxBad` corrupted shares
//! by searching the `k`-subsets for a polynomial most shares agree with.

pub mod combinations;
pub mod error;
pub mod params;
pub mod reconstruct;
pub mod robust;
pub mod selection;
pub mod share;
pub mod source;
pub mod traits;

pub use crate::{
    error::{RecoveryError, RecoveryResult},
    params::{validate_threshold_config, ReconstructionParams},
    reconstruct::{
        reconstruct_polynomial, reconstruct_secret, reconstruct_secret_with,
        reconstruct_source,
    },
    robust::{
        reconstruct_robust, reconstruct_robust_source, CancelFlag, Recovered,
        RobustReconstructor, SearchMode, SearchOptions, SearchOutcome,
        SearchReport, SearchState,
    },
    selection::SelectionStrategy,
    share::{ensure_distinct_x, Share},
    source::{decode_value, ShareSet, SourceError},
    traits::ShareSource,
};
