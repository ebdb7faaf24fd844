//! The candidate scan.
//!
//! For every candidate cutoff, ascending:
//! - take the events `m >= mc`
//! - skip the candidate if fewer than `min_events` remain
//! - otherwise dither the subset `n_dithers` times, test each realization for
//!   exponentiality, and record the mean p-value
//!
//! and finally select the smallest candidate whose mean p-value exceeds `alpha`.
//!
//! The sequential scan draws from a caller-supplied RNG, so a seeded generator
//! reproduces a run exactly. The parallel scan evaluates candidates on the rayon
//! pool, each with its own generator derived from a seed and the candidate index.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, debug_span, info, trace, warn};

use crate::domain::{CandidatePValue, McConfig, McEstimate, PValueRecord, SkippedCandidate};
use crate::error::McError;
use crate::estimate::candidates::{Candidate, CandidateGrid};
use crate::estimate::selection::select_mc;
use crate::gof::{ExponentialityTest, LillieforsExp, checked_p_value};
use crate::sampling::{Dither, TruncatedExp};

/// Per-candidate result before assembly into an [`McEstimate`].
#[derive(Debug, Clone, Copy, PartialEq)]
enum CandidateOutcome {
    Evaluated { mc: f64, value: CandidatePValue },
    Skipped(SkippedCandidate),
}

/// Completeness estimator: a validated configuration plus an exponentiality test.
#[derive(Debug, Clone)]
pub struct McEstimator<T = LillieforsExp> {
    config: McConfig,
    dither: Dither,
    test: T,
}

impl McEstimator<LillieforsExp> {
    /// Estimator using the table-based Lilliefors test.
    pub fn lilliefors(config: McConfig) -> Result<Self, McError> {
        Self::new(config, LillieforsExp)
    }
}

impl<T: ExponentialityTest> McEstimator<T> {
    /// Validate `config` and pair it with `test`.
    pub fn new(config: McConfig, test: T) -> Result<Self, McError> {
        config.validate()?;
        let dither = Dither::from_noise(TruncatedExp::new(config.beta(), config.delta_m)?);

        let test_min = test.min_sample_size();
        if config.min_events < test_min {
            warn!(
                min_events = config.min_events,
                test_min,
                "min_events is below the test minimum; small subsets will fail the scan"
            );
        }

        Ok(Self {
            config,
            dither,
            test,
        })
    }

    pub fn config(&self) -> &McConfig {
        &self.config
    }

    pub fn test(&self) -> &T {
        &self.test
    }

    /// Scan `magnitudes`, drawing all noise from `rng`.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        magnitudes: &[f64],
        rng: &mut R,
    ) -> Result<McEstimate, McError> {
        let grid = CandidateGrid::new(magnitudes)?;
        let _span = debug_span!(
            "mc_scan",
            n_events = magnitudes.len(),
            n_candidates = grid.len(),
            parallel = false
        )
        .entered();

        let mut outcomes = Vec::with_capacity(grid.len());
        for candidate in grid.iter() {
            outcomes.push(self.scan_candidate(candidate, rng)?);
        }
        Ok(self.assemble(outcomes))
    }

    /// Scan `magnitudes` with candidates evaluated in parallel.
    ///
    /// Each candidate draws from its own `StdRng` seeded from `seed` and the
    /// candidate's position, so the result does not depend on the thread count.
    /// Seeds are derived with a fixed SplitMix64 mixer and are stable across
    /// platforms and toolchains.
    pub fn estimate_par(&self, magnitudes: &[f64], seed: u64) -> Result<McEstimate, McError> {
        let grid = CandidateGrid::new(magnitudes)?;
        let _span = debug_span!(
            "mc_scan",
            n_events = magnitudes.len(),
            n_candidates = grid.len(),
            parallel = true
        )
        .entered();

        let candidates: Vec<Candidate<'_>> = grid.iter().collect();
        let outcomes = candidates
            .par_iter()
            .enumerate()
            .map(|(idx, candidate)| {
                let mut rng = StdRng::seed_from_u64(candidate_seed(seed, idx, candidate.mc));
                self.scan_candidate(*candidate, &mut rng)
            })
            .collect::<Result<Vec<_>, McError>>()?;
        Ok(self.assemble(outcomes))
    }

    fn scan_candidate<R: Rng + ?Sized>(
        &self,
        candidate: Candidate<'_>,
        rng: &mut R,
    ) -> Result<CandidateOutcome, McError> {
        let mc = candidate.mc;
        let n_events = candidate.n_events();
        if n_events < self.config.min_events {
            trace!(mc, n_events, "skipping candidate: too few events");
            return Ok(CandidateOutcome::Skipped(SkippedCandidate { mc, n_events }));
        }

        let mut realization = Vec::with_capacity(n_events);
        let mut mean_p_value = 0.0;
        for trial in 0..self.config.n_dithers {
            self.dither.apply_into(candidate.subset, rng, &mut realization)?;
            let p = checked_p_value(&self.test, &realization)?;
            // Running mean: no large partial sums, exact for constant inputs.
            mean_p_value += (p - mean_p_value) / (trial + 1) as f64;
        }

        debug!(mc, n_events, mean_p_value, "evaluated candidate");
        Ok(CandidateOutcome::Evaluated {
            mc,
            value: CandidatePValue {
                mean_p_value,
                n_events,
            },
        })
    }

    fn assemble(&self, outcomes: Vec<CandidateOutcome>) -> McEstimate {
        let mut p_values = PValueRecord::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                CandidateOutcome::Evaluated { mc, value } => p_values.insert(mc, value),
                CandidateOutcome::Skipped(s) => skipped.push(s),
            }
        }

        let mc = select_mc(&p_values, self.config.alpha);
        info!(
            mc = ?mc,
            evaluated = p_values.len(),
            skipped = skipped.len(),
            alpha = self.config.alpha,
            "completeness scan finished"
        );

        McEstimate {
            mc,
            alpha: self.config.alpha,
            p_values,
            skipped,
        }
    }
}

/// Estimate Mc with the Lilliefors test, drawing noise from `rng`.
pub fn estimate_mc<R: Rng + ?Sized>(
    magnitudes: &[f64],
    config: &McConfig,
    rng: &mut R,
) -> Result<McEstimate, McError> {
    McEstimator::lilliefors(config.clone())?.estimate(magnitudes, rng)
}

/// Parallel form of [`estimate_mc`], reproducible from `seed`.
pub fn estimate_mc_par(
    magnitudes: &[f64],
    config: &McConfig,
    seed: u64,
) -> Result<McEstimate, McError> {
    McEstimator::lilliefors(config.clone())?.estimate_par(magnitudes, seed)
}

/// SplitMix64 finalizer.
#[allow(clippy::unreadable_literal)]
fn mix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

fn candidate_seed(seed: u64, idx: usize, mc: f64) -> u64 {
    let h = mix64(mix64(seed) ^ idx as u64);
    mix64(h ^ mc.to_bits())
}
