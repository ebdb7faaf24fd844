//! Domain types used throughout the scan.
//!
//! This module defines:
//!
//! - scan configuration (`McConfig`)
//! - the ordered p-value record (`PValueRecord`, keyed by `Magnitude`)
//! - scan outputs (`McEstimate`, `SkippedCandidate`, `CandidateStatus`)

pub mod types;

pub use types::*;
