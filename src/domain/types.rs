//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the candidate scan
//! - exported to JSON for diagnostics
//! - reloaded later for comparisons between runs

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{McError, require_positive};

/// Parameters of a completeness scan.
///
/// Defaults follow common practice for catalogs binned at 0.1 magnitude units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McConfig {
    /// Width of the magnitude bins (Δm).
    pub delta_m: f64,
    /// Gutenberg–Richter b-value; the noise rate is `b · ln 10`.
    pub b_value: f64,
    /// Significance level; a candidate qualifies when its mean p-value is `> alpha`.
    pub alpha: f64,
    /// Dithering trials averaged per candidate.
    pub n_dithers: usize,
    /// Minimum number of events at or above a candidate for it to be evaluated.
    pub min_events: usize,
}

impl Default for McConfig {
    fn default() -> Self {
        Self {
            delta_m: 0.1,
            b_value: 1.0,
            alpha: 0.1,
            n_dithers: 50,
            min_events: 50,
        }
    }
}

impl McConfig {
    /// Check every parameter contract.
    pub fn validate(&self) -> Result<(), McError> {
        require_positive("delta_m", self.delta_m)?;
        require_positive("b_value", self.b_value)?;
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(McError::invalid(
                "alpha",
                format!("must lie in (0, 1), got {}", self.alpha),
            ));
        }
        if self.n_dithers < 1 {
            return Err(McError::invalid("n_dithers", "must be >= 1"));
        }
        if self.min_events < 1 {
            return Err(McError::invalid("min_events", "must be >= 1"));
        }
        Ok(())
    }

    /// Exponential rate implied by the b-value.
    pub fn beta(&self) -> f64 {
        self.b_value * std::f64::consts::LN_10
    }
}

/// A magnitude usable as an ordered map key.
///
/// Ordering is `f64::total_cmp`; negative zero is folded into zero on construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Magnitude(f64);

impl Magnitude {
    pub fn new(value: f64) -> Self {
        Self(value + 0.0)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Magnitude {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Magnitude {}

impl PartialOrd for Magnitude {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Magnitude {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Mean p-value of one evaluated candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidatePValue {
    pub mean_p_value: f64,
    /// Size of the subset `m >= mc` the trials ran on.
    pub n_events: usize,
}

/// Flat form of a record entry, used for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PValueEntry {
    pub mc: f64,
    pub mean_p_value: f64,
    pub n_events: usize,
}

/// Candidate cutoff -> mean p-value, iterated in ascending candidate order.
///
/// Only evaluated candidates are present. Candidates skipped for having too few
/// events live in [`McEstimate::skipped`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PValueEntry>", into = "Vec<PValueEntry>")]
pub struct PValueRecord {
    entries: BTreeMap<Magnitude, CandidatePValue>,
}

impl PValueRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mc: f64, value: CandidatePValue) {
        self.entries.insert(Magnitude::new(mc), value);
    }

    /// Mean p-value recorded for `mc`, if it was evaluated.
    pub fn get(&self, mc: f64) -> Option<f64> {
        self.entry(mc).map(|v| v.mean_p_value)
    }

    pub fn entry(&self, mc: f64) -> Option<&CandidatePValue> {
        self.entries.get(&Magnitude::new(mc))
    }

    pub fn contains(&self, mc: f64) -> bool {
        self.entries.contains_key(&Magnitude::new(mc))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(mc, mean p-value)` pairs in ascending `mc` order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k.get(), v.mean_p_value))
    }

    pub fn entries(&self) -> impl Iterator<Item = (f64, &CandidatePValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.get(), v))
    }

    pub fn candidates(&self) -> Vec<f64> {
        self.entries.keys().map(|k| k.get()).collect()
    }
}

impl From<Vec<PValueEntry>> for PValueRecord {
    fn from(rows: Vec<PValueEntry>) -> Self {
        let mut record = Self::new();
        for row in rows {
            record.insert(
                row.mc,
                CandidatePValue {
                    mean_p_value: row.mean_p_value,
                    n_events: row.n_events,
                },
            );
        }
        record
    }
}

impl From<PValueRecord> for Vec<PValueEntry> {
    fn from(record: PValueRecord) -> Self {
        record
            .entries()
            .map(|(mc, v)| PValueEntry {
                mc,
                mean_p_value: v.mean_p_value,
                n_events: v.n_events,
            })
            .collect()
    }
}

/// A candidate left out of the record because too few events lie above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub mc: f64,
    pub n_events: usize,
}

/// How a single candidate fared in a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// The reported Mc.
    Selected,
    /// Mean p-value above alpha, but a smaller candidate was selected first.
    Accepted,
    /// Evaluated with mean p-value `<= alpha`.
    Rejected,
    /// Not evaluated: fewer than `min_events` events at or above it.
    InsufficientEvents,
}

impl CandidateStatus {
    pub fn display_name(self) -> &'static str {
        match self {
            CandidateStatus::Selected => "selected",
            CandidateStatus::Accepted => "accepted",
            CandidateStatus::Rejected => "rejected",
            CandidateStatus::InsufficientEvents => "insufficient events",
        }
    }
}

/// Output of a completeness scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McEstimate {
    /// Selected magnitude of completeness; `None` when no candidate qualifies.
    pub mc: Option<f64>,
    /// Significance level the selection used.
    pub alpha: f64,
    pub p_values: PValueRecord,
    /// Candidates with fewer than `min_events` events, ascending.
    pub skipped: Vec<SkippedCandidate>,
}

impl McEstimate {
    /// Every candidate the scan considered, ascending.
    pub fn candidates(&self) -> Vec<f64> {
        let mut all: Vec<f64> = self
            .p_values
            .candidates()
            .into_iter()
            .chain(self.skipped.iter().map(|s| s.mc))
            .collect();
        all.sort_by(f64::total_cmp);
        all
    }

    /// Status of `mc`, or `None` when it was never a candidate.
    pub fn status(&self, mc: f64) -> Option<CandidateStatus> {
        if let Some(p) = self.p_values.get(mc) {
            let selected = self
                .mc
                .is_some_and(|sel| Magnitude::new(sel) == Magnitude::new(mc));
            return Some(if selected {
                CandidateStatus::Selected
            } else if p > self.alpha {
                CandidateStatus::Accepted
            } else {
                CandidateStatus::Rejected
            });
        }
        self.skipped
            .iter()
            .any(|s| Magnitude::new(s.mc) == Magnitude::new(mc))
            .then_some(CandidateStatus::InsufficientEvents)
    }
}
