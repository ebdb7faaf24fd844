//! Formatted terminal output for a completeness scan.
//!
//! We keep formatting code in one place so:
//! - the sampling/estimation code stays clean and testable
//! - output changes are localized

use crate::domain::McEstimate;
use crate::estimate::qualifying_candidates;

/// Format the scan outcome followed by the per-candidate table.
pub fn format_scan_summary(estimate: &McEstimate) -> String {
    let mut out = String::new();

    out.push_str("=== Mc scan (dithered Lilliefors) ===\n");
    match estimate.mc {
        Some(mc) => out.push_str(&format!("Mc: {mc:.2}\n")),
        None => out.push_str(&format!(
            "Mc: none (no candidate with mean p-value > {})\n",
            estimate.alpha
        )),
    }
    out.push_str(&format!(
        "Candidates: {} evaluated, {} with too few events\n",
        estimate.p_values.len(),
        estimate.skipped.len()
    ));
    let qualifying = qualifying_candidates(&estimate.p_values, estimate.alpha);
    if !qualifying.is_empty() {
        let list: Vec<String> = qualifying.iter().map(|mc| format!("{mc:.2}")).collect();
        out.push_str(&format!("Above alpha: {}\n", list.join(", ")));
    }
    out.push('\n');
    out.push_str(&format_candidate_table(estimate));

    out
}

/// One row per candidate, ascending, including skipped candidates.
pub fn format_candidate_table(estimate: &McEstimate) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>8} {:>9} {:>10}  {}\n",
        "mc", "n_events", "mean_p", "status"
    ));
    out.push_str(&format!("{:->8} {:->9} {:->10}  {:-<19}\n", "", "", "", ""));

    for mc in estimate.candidates() {
        let Some(status) = estimate.status(mc) else {
            continue;
        };
        let (n_events, mean_p) = match estimate.p_values.entry(mc) {
            Some(v) => (v.n_events, format!("{:.4}", v.mean_p_value)),
            None => (skipped_events(estimate, mc), "-".to_string()),
        };
        out.push_str(&format!(
            "{mc:>8.2} {n_events:>9} {mean_p:>10}  {}\n",
            status.display_name()
        ));
    }

    out
}

fn skipped_events(estimate: &McEstimate, mc: f64) -> usize {
    estimate
        .skipped
        .iter()
        .find(|s| s.mc == mc)
        .map(|s| s.n_events)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidatePValue, PValueRecord, SkippedCandidate};

    fn estimate(mc: Option<f64>) -> McEstimate {
        let mut p_values = PValueRecord::new();
        p_values.insert(1.9, CandidatePValue { mean_p_value: 0.01, n_events: 1020 });
        p_values.insert(2.0, CandidatePValue { mean_p_value: 0.1394, n_events: 1000 });
        McEstimate {
            mc,
            alpha: 0.1,
            p_values,
            skipped: vec![SkippedCandidate { mc: 3.4, n_events: 41 }],
        }
    }

    #[test]
    fn summary_lists_every_candidate_with_status() {
        let text = format_scan_summary(&estimate(Some(2.0)));
        assert!(text.contains("Mc: 2.00"));
        assert!(text.contains("2 evaluated, 1 with too few events"));
        assert!(text.contains("Above alpha: 2.00\n"));

        let rows: Vec<&str> = text
            .lines()
            .filter(|l| l.trim_start().starts_with(|c: char| c.is_ascii_digit()))
            .collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("1.90") && rows[0].ends_with("rejected"));
        assert!(rows[1].contains("0.1394") && rows[1].ends_with("selected"));
        assert!(rows[2].contains("41") && rows[2].contains(" - ") && rows[2].ends_with("insufficient events"));
    }

    #[test]
    fn summary_reports_missing_mc() {
        let text = format_scan_summary(&estimate(None));
        assert!(text.contains("Mc: none (no candidate with mean p-value > 0.1)"));
        assert!(text.contains("Above alpha: 2.00"));
        assert!(text.contains("accepted"));
    }
}
