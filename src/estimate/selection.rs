//! Mc selection from the per-candidate mean p-values.
//!
//! Rule: the smallest evaluated candidate whose mean p-value exceeds `alpha`.
//! Above it the catalog is indistinguishable from a Gutenberg–Richter
//! exponential at level `alpha`. Larger candidates that also pass do not
//! change the answer, and candidates without a record never qualify.

use crate::domain::PValueRecord;

/// Smallest candidate with mean p-value `> alpha`.
pub fn select_mc(record: &PValueRecord, alpha: f64) -> Option<f64> {
    record.iter().find(|&(_, p)| p > alpha).map(|(mc, _)| mc)
}

/// Every candidate with mean p-value `> alpha`, ascending.
pub fn qualifying_candidates(record: &PValueRecord, alpha: f64) -> Vec<f64> {
    record
        .iter()
        .filter(|&(_, p)| p > alpha)
        .map(|(mc, _)| mc)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidatePValue;

    fn record(rows: &[(f64, f64)]) -> PValueRecord {
        let mut out = PValueRecord::new();
        for &(mc, p) in rows {
            out.insert(mc, CandidatePValue { mean_p_value: p, n_events: 100 });
        }
        out
    }

    #[test]
    fn picks_first_ascending_candidate_above_alpha() {
        // Inserted out of order: selection must follow magnitude order.
        let r = record(&[(2.2, 0.14), (2.0, 0.03), (2.1, 0.12), (1.9, 0.01)]);
        assert_eq!(select_mc(&r, 0.1), Some(2.1));
        assert_eq!(qualifying_candidates(&r, 0.1), vec![2.1, 2.2]);
    }

    #[test]
    fn threshold_is_strict() {
        let r = record(&[(1.0, 0.1), (1.1, 0.1000001)]);
        assert_eq!(select_mc(&r, 0.1), Some(1.1));
    }

    #[test]
    fn nothing_qualifies() {
        assert_eq!(select_mc(&record(&[(1.0, 0.05), (1.5, 0.1)]), 0.1), None);
        assert_eq!(select_mc(&PValueRecord::new(), 0.1), None);
    }

    #[test]
    fn rejected_candidates_above_selection_are_allowed() {
        let r = record(&[(1.0, 0.2), (1.1, 0.02)]);
        assert_eq!(select_mc(&r, 0.1), Some(1.0));
    }
}
