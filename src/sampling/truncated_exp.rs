//! Exponential noise truncated to a single magnitude bin.
//!
//! Sampling is by exact inverse CDF:
//!
//! `x = -(1/β) · ln(1 - U · (1 - e^{-βΔm}))`, with `U ~ (0, 1)`
//!
//! `U` comes from the open unit interval so the transform never evaluates `ln(0)`.

use rand::Rng;
use rand_distr::{Distribution, Open01};

use crate::error::{McError, require_positive};

/// Exponential distribution with rate `beta`, conditioned on `[0, width)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedExp {
    beta: f64,
    width: f64,
    /// `1 - e^{-β·width}`: probability mass of the untruncated law inside the support.
    mass: f64,
}

impl TruncatedExp {
    pub fn new(beta: f64, width: f64) -> Result<Self, McError> {
        let beta = require_positive("beta", beta)?;
        let width = require_positive("delta_m", width)?;
        let mass = -(-beta * width).exp_m1();
        if !(mass > 0.0) {
            return Err(McError::invalid(
                "beta",
                format!("beta * delta_m = {} leaves no probability mass", beta * width),
            ));
        }
        Ok(Self { beta, width, mass })
    }

    /// Noise law for a Gutenberg–Richter b-value: `β = b · ln 10`.
    pub fn from_b_value(b_value: f64, width: f64) -> Result<Self, McError> {
        let b_value = require_positive("b_value", b_value)?;
        Self::new(b_value * std::f64::consts::LN_10, width)
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// `F(x) = (1 - e^{-βx}) / (1 - e^{-βΔm})` on the support, 0 below and 1 above.
    pub fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else if x >= self.width {
            1.0
        } else {
            -(-self.beta * x).exp_m1() / self.mass
        }
    }

    /// Draw `n` independent values.
    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.sample(rng));
        }
        out
    }
}

impl Distribution<f64> for TruncatedExp {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        let x = -(-u * self.mass).ln_1p() / self.beta;
        // Rounding can land exactly on the upper edge when U is within an ulp of 1.
        if x < self.width {
            x
        } else {
            below(self.width)
        }
    }
}

/// Largest `f64` strictly below a positive finite `x`.
fn below(x: f64) -> f64 {
    f64::from_bits(x.to_bits() - 1)
}
