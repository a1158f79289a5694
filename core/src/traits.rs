use math::PrimeField;

use crate::{params::ReconstructionParams, share::Share};

/// Anything that can hand the reconstructors a field, a share list and the
/// `(k, maxBad)` parameters. Implemented by the parsed
/// [`ShareSet`](crate::source::ShareSet); tests and callers can provide
/// their own.
pub trait ShareSource {
    fn shares(&self) -> &[Share];

    fn field(&self) -> &PrimeField;

    fn threshold(&self) -> usize;

    fn max_bad(&self) -> usize {
        0
    }

    fn params(&self) -> ReconstructionParams {
        ReconstructionParams::new(self.threshold(), self.max_bad())
    }

    fn share_count(&self) -> usize {
        self.shares().len()
    }
}
