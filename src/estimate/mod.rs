//! Magnitude of completeness estimation.
//!
//! Responsibilities:
//!
//! - build the candidate grid (sorted distinct magnitudes)
//! - evaluate each candidate by repeated dithering + exponentiality tests
//! - select Mc as the smallest candidate with mean p-value above alpha

pub(crate) mod candidates;
pub mod scan;
pub mod selection;

pub use scan::*;
pub use selection::*;
