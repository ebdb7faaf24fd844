//! Goodness-of-fit tests for exponentiality.
//!
//! The scan only needs one capability from a test: turn a sample of continuous,
//! origin-anchored values into a p-value for "this is exponential with a rate
//! estimated from the sample". Anything implementing [`ExponentialityTest`]
//! can be plugged into [`crate::estimate::McEstimator`].

pub mod lilliefors;

pub use lilliefors::*;

use crate::error::McError;

/// A p-value producing test for exponentiality.
///
/// Implementations must be `Sync` so candidates can be evaluated in parallel.
pub trait ExponentialityTest: Sync {
    /// Smallest sample the test can handle.
    fn min_sample_size(&self) -> usize {
        1
    }

    /// p-value in `[0, 1]`; higher means weaker evidence against exponentiality.
    ///
    /// Fails with [`McError::TestUnavailable`] when the sample cannot be tested.
    fn p_value(&self, sample: &[f64]) -> Result<f64, McError>;
}

impl<F> ExponentialityTest for F
where
    F: Fn(&[f64]) -> Result<f64, McError> + Sync,
{
    fn p_value(&self, sample: &[f64]) -> Result<f64, McError> {
        self(sample)
    }
}

/// Run `test` on `sample`, enforcing the size and range contract.
pub(crate) fn checked_p_value<T: ExponentialityTest + ?Sized>(
    test: &T,
    sample: &[f64],
) -> Result<f64, McError> {
    let min = test.min_sample_size().max(1);
    if sample.len() < min {
        return Err(McError::test_unavailable(format!(
            "sample of {} values is below the test minimum of {min}",
            sample.len()
        )));
    }
    let p = test.p_value(sample)?;
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(McError::test_unavailable(format!("test returned p-value {p} outside [0, 1]")))
    }
}
