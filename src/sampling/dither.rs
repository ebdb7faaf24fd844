//! Dithering of binned magnitudes into continuous values.
//!
//! Each magnitude receives independent truncated-exponential noise on `[0, Δm)`
//! and the realization is shifted so the smallest input magnitude maps to its
//! own noise draw. The result is non-negative and starts near zero, which is
//! where the exponentiality test expects the origin.

use rand::Rng;

use crate::error::McError;
use crate::sampling::TruncatedExp;

/// Dithering transform for a fixed bin width and b-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dither {
    noise: TruncatedExp,
}

impl Dither {
    pub fn new(delta_m: f64, b_value: f64) -> Result<Self, McError> {
        Ok(Self {
            noise: TruncatedExp::from_b_value(b_value, delta_m)?,
        })
    }

    /// Dithering with an already-validated noise law.
    pub fn from_noise(noise: TruncatedExp) -> Self {
        Self { noise }
    }

    /// One continuous realization of `mags`.
    pub fn apply<R: Rng + ?Sized>(&self, mags: &[f64], rng: &mut R) -> Result<Vec<f64>, McError> {
        let mut out = Vec::with_capacity(mags.len());
        self.apply_into(mags, rng, &mut out)?;
        Ok(out)
    }

    /// Like [`Dither::apply`], reusing `out` (cleared first).
    pub fn apply_into<R: Rng + ?Sized>(
        &self,
        mags: &[f64],
        rng: &mut R,
        out: &mut Vec<f64>,
    ) -> Result<(), McError> {
        let min_mag = mags
            .iter()
            .copied()
            .reduce(f64::min)
            .ok_or(McError::EmptyInput)?;

        out.clear();
        out.extend(mags.iter().map(|&m| {
            let noise: f64 = rng.sample(self.noise);
            // `m - min_mag` first: keeps the minimum element's offset exactly zero.
            (m - min_mag) + noise
        }));
        Ok(())
    }
}

/// One-shot dithering of `mags` with bin width `delta_m` and GR `b_value`.
pub fn dither_magnitudes<R: Rng + ?Sized>(
    mags: &[f64],
    delta_m: f64,
    b_value: f64,
    rng: &mut R,
) -> Result<Vec<f64>, McError> {
    Dither::new(delta_m, b_value)?.apply(mags, rng)
}
