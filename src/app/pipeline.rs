//! Shared estimation pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! bin table ingest -> per-bin estimate -> histogram -> exports

use tracing::{info, warn};

use crate::domain::{EstimateConfig, FakeHistogram};
use crate::error::AppError;
use crate::estimate::estimate_histogram;
use crate::io::ingest::{BinTable, load_bin_table};

/// All computed outputs of a single `fakes estimate` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub histogram: FakeHistogram,
}

/// Execute the full estimation pipeline and return the computed outputs.
pub fn run_estimate(config: &EstimateConfig) -> Result<RunOutput, AppError> {
    // 1) Read the per-bin region contents.
    let table = load_bin_table(&config.input_path)?;

    run_estimate_with_table(config, table)
}

/// Execute the pipeline on an already-ingested bin table.
pub fn run_estimate_with_table(config: &EstimateConfig, table: BinTable) -> Result<RunOutput, AppError> {
    info!(label = %config.label, bins = table.bins.len(), "estimating fake background");

    // 2) Estimate every bin.
    let histogram = estimate_histogram(&table.bins)?;

    let clamped = histogram.clamped_bins();
    if clamped > 0 {
        warn!(clamped, "negative fake estimates clamped to zero");
    }
    info!(
        integral = histogram.integral(),
        error = histogram.integral_error(),
        "fake background estimated"
    );

    Ok(RunOutput { histogram })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::read_bin_table;
    use std::path::PathBuf;

    fn config() -> EstimateConfig {
        EstimateConfig {
            input_path: PathBuf::from("bins.csv"),
            label: "test".to_string(),
            plot: false,
            plot_width: 40,
            export_results: None,
            export_shape: None,
        }
    }

    const HEADER: &str = "bin,fake1_enriched,fake1_signal_ewk,fake1_signal_qcd,fake1_triple_qcd,\
fake2_enriched,fake2_signal_ewk,fake2_signal_qcd,fake2_triple_qcd,triple_enriched,double_signal,double_enriched";

    #[test]
    fn pipeline_estimates_every_bin() {
        let csv = format!("{HEADER}\n0,0,0,0,0,0,0,0,0,0,0,0\n1,100,10,20,5,0,0,0,0,50,0,0\n");
        let table = read_bin_table(csv.as_bytes()).unwrap();
        let run = run_estimate_with_table(&config(), table).unwrap();

        assert_eq!(run.histogram.bins.len(), 2);
        assert_eq!(run.histogram.bins[0].content, 0.0);
        assert!((run.histogram.bins[1].content - 11.0).abs() < 1e-12);
        assert!((run.histogram.integral() - 11.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_bin_fails_with_estimation_exit_code() {
        let csv = format!("{HEADER}\n0,1,1,1,0,0,0,0,0,0,-1,2\n");
        let table = read_bin_table(csv.as_bytes()).unwrap();
        let err = run_estimate_with_table(&config(), table).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.message().contains("bin 0"));
    }

    #[test]
    fn missing_input_file_is_an_input_error() {
        let mut cfg = config();
        cfg.input_path = PathBuf::from("/nonexistent/bins.csv");
        let err = run_estimate(&cfg).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
