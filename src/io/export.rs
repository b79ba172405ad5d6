//! Export per-bin fake estimates to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::FakeHistogram;
use crate::error::AppError;

/// Write per-bin results to a CSV file.
pub fn write_results_csv(path: &Path, histogram: &FakeHistogram) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, histogram)
}

/// Write per-bin results as CSV to any writer.
pub fn write_results<W: Write>(mut out: W, histogram: &FakeHistogram) -> Result<(), AppError> {
    writeln!(out, "bin,low_edge,high_edge,nominal,std_dev,content,error")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for b in &histogram.bins {
        writeln!(
            out,
            "{},{},{},{:.10},{:.10},{:.10},{:.10}",
            b.bin,
            b.low_edge.map(|v| v.to_string()).unwrap_or_default(),
            b.high_edge.map(|v| v.to_string()).unwrap_or_default(),
            b.estimate.nominal_value,
            b.estimate.standard_deviation,
            b.content,
            b.error,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CombinedEstimate, FakeBin};

    #[test]
    fn writes_header_and_rows() {
        let histogram = FakeHistogram {
            bins: vec![
                FakeBin {
                    bin: 0,
                    low_edge: None,
                    high_edge: None,
                    estimate: CombinedEstimate::ZERO,
                    content: 0.0,
                    error: 0.0,
                },
                FakeBin {
                    bin: 1,
                    low_edge: Some(0.0),
                    high_edge: Some(20.0),
                    estimate: CombinedEstimate {
                        nominal_value: -0.5,
                        standard_deviation: 0.25,
                    },
                    content: 0.0,
                    error: 0.25,
                },
            ],
        };

        let mut buf = Vec::new();
        write_results(&mut buf, &histogram).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "bin,low_edge,high_edge,nominal,std_dev,content,error");
        assert_eq!(
            lines[1],
            "0,,,0.0000000000,0.0000000000,0.0000000000,0.0000000000"
        );
        assert_eq!(
            lines[2],
            "1,0,20,-0.5000000000,0.2500000000,0.0000000000,0.2500000000"
        );
    }
}
