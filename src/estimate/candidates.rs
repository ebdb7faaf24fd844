//! Candidate cutoff generation.
//!
//! The candidate set is exactly the sorted set of distinct magnitudes in the
//! sample. Sorting the sample once lets every candidate's subset `m >= mc` be a
//! tail slice of the sorted data, so no per-candidate filtering or copying is
//! needed.

use crate::error::McError;

/// One candidate cutoff with the events at or above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate<'a> {
    pub mc: f64,
    /// Events `m >= mc`, ascending.
    pub subset: &'a [f64],
}

impl Candidate<'_> {
    pub fn n_events(&self) -> usize {
        self.subset.len()
    }
}

/// Sorted sample plus the start offset of each distinct value.
#[derive(Debug, Clone)]
pub(crate) struct CandidateGrid {
    sorted: Vec<f64>,
    starts: Vec<usize>,
}

impl CandidateGrid {
    pub fn new(magnitudes: &[f64]) -> Result<Self, McError> {
        if magnitudes.is_empty() {
            return Err(McError::EmptyInput);
        }
        if let Some(idx) = magnitudes.iter().position(|m| !m.is_finite()) {
            return Err(McError::invalid(
                "magnitudes",
                format!("value at index {idx} is not finite ({})", magnitudes[idx]),
            ));
        }

        let mut sorted = magnitudes.to_vec();
        sorted.sort_by(f64::total_cmp);

        // `-0.0 == 0.0`, so signed zeros share one start.
        let mut starts = vec![0];
        for i in 1..sorted.len() {
            if sorted[i] != sorted[i - 1] {
                starts.push(i);
            }
        }

        Ok(Self { sorted, starts })
    }

    /// Number of candidates (distinct magnitudes).
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn get(&self, idx: usize) -> Option<Candidate<'_>> {
        let start = *self.starts.get(idx)?;
        Some(Candidate {
            mc: self.sorted[start] + 0.0,
            subset: &self.sorted[start..],
        })
    }

    /// Candidates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Candidate<'_>> + '_ {
        (0..self.len()).filter_map(|idx| self.get(idx))
    }

}
