//! Reporting utilities: formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimation code stays clean and testable
//! - output changes are localized

use crate::domain::{CombinedEstimate, FakeBin, FakeHistogram};

/// Format the run summary (input + integral).
pub fn format_run_summary(histogram: &FakeHistogram, label: &str, source: &str) -> String {
    let mut out = String::new();

    out.push_str("=== fakes - fake background estimate ===\n");
    if !label.is_empty() {
        out.push_str(&format!("Label: {label}\n"));
    }
    out.push_str(&format!("Input: {source}\n"));
    out.push_str(&format!(
        "Bins: n={} | clamped={}\n",
        histogram.bins.len(),
        histogram.clamped_bins()
    ));
    out.push_str(&format!(
        "Integral: {:.4} +/- {:.4}\n",
        histogram.integral(),
        histogram.integral_error()
    ));

    out
}

/// Format the per-bin table.
pub fn format_bin_table(histogram: &FakeHistogram) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>5} {:<20} {:>12} {:>12} {:>12}\n",
            "bin", "range", "nominal", "std_dev", "content"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:->5} {:-<20} {:->12} {:->12} {:->12}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for b in &histogram.bins {
        out.push_str(format_bin_row(b).trim_end());
        out.push('\n');
    }

    out
}

fn format_bin_row(b: &FakeBin) -> String {
    let flag = if b.is_clamped() { " (clamped)" } else { "" };
    format!(
        "{:>5} {:<20} {:>12.4} {:>12.4} {:>12.4}{flag}",
        b.bin,
        truncate(&b.range_label(), 20),
        b.estimate.nominal_value,
        b.estimate.standard_deviation,
        b.content,
    )
}

/// Format a single combined estimate (used by `fakes bin`).
pub fn format_estimate(estimate: &CombinedEstimate) -> String {
    let mut out = format!(
        "Fake yield: {:.4} +/- {:.4}\n",
        estimate.nominal_value, estimate.standard_deviation
    );
    if estimate.nominal_value < 0.0 {
        out.push_str("Note: negative nominal value; histogram content would be clamped to 0.\n");
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram() -> FakeHistogram {
        FakeHistogram {
            bins: vec![
                FakeBin {
                    bin: 1,
                    low_edge: Some(0.0),
                    high_edge: Some(20.0),
                    estimate: CombinedEstimate {
                        nominal_value: 11.0,
                        standard_deviation: 1.0,
                    },
                    content: 11.0,
                    error: 1.0,
                },
                FakeBin {
                    bin: 2,
                    low_edge: None,
                    high_edge: None,
                    estimate: CombinedEstimate {
                        nominal_value: -0.5,
                        standard_deviation: 0.25,
                    },
                    content: 0.0,
                    error: 0.25,
                },
            ],
        }
    }

    #[test]
    fn summary_reports_integral_and_clamps() {
        let txt = format_run_summary(&histogram(), "mmt", "bins.csv");
        assert!(txt.contains("Label: mmt\n"));
        assert!(txt.contains("Bins: n=2 | clamped=1\n"));
        assert!(txt.contains("Integral: 11.0000 +/- 1.0308\n"));
    }

    #[test]
    fn table_rows() {
        let txt = format_bin_table(&histogram());
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  bin range"));
        assert_eq!(
            lines[2],
            "    1 [0, 20)                   11.0000       1.0000      11.0000"
        );
        assert!(lines[3].ends_with("0.0000 (clamped)"));
        assert!(lines[3].contains("bin 2"));
    }

    #[test]
    fn single_estimate_notes_negative_values() {
        let pos = format_estimate(&CombinedEstimate {
            nominal_value: 2.0,
            standard_deviation: 0.5,
        });
        assert_eq!(pos, "Fake yield: 2.0000 +/- 0.5000\n");

        let neg = format_estimate(&CombinedEstimate {
            nominal_value: -1.0,
            standard_deviation: 0.5,
        });
        assert!(neg.contains("clamped"));
    }

    #[test]
    fn truncate_long_labels() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
