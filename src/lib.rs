//! `mc-lilliefors` library crate.
//!
//! Estimates the magnitude of completeness (Mc) of an earthquake catalog by
//! dithering binned magnitudes into continuous values and testing each
//! candidate cutoff for exponentiality (Gutenberg–Richter):
//!
//! - `sampling`: truncated-exponential noise and the dithering transform
//! - `gof`: the exponentiality test seam and a table-based Lilliefors test
//! - `estimate`: candidate grid, repeated-trial scan, Mc selection
//! - `report` / `io`: text and JSON diagnostics of a scan

pub mod domain;
pub mod error;
pub mod estimate;
pub mod gof;
pub mod io;
pub mod report;
pub mod sampling;

pub use domain::{CandidateStatus, McConfig, McEstimate, PValueRecord};
pub use error::McError;
pub use estimate::{McEstimator, estimate_mc, estimate_mc_par};
pub use gof::{ExponentialityTest, LillieforsExp};
pub use sampling::{Dither, TruncatedExp, dither_magnitudes};
