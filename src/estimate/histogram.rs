//! Build the fake background histogram from per-bin inputs.
//!
//! Bins are independent, so they are evaluated in parallel; the output keeps
//! the input order.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{BinInputs, FakeBin, FakeHistogram};
use crate::error::EstimateError;
use crate::estimate::fake_yield::estimate;

/// Estimate one bin and convert it to a (clamped) histogram bin.
pub fn estimate_bin(inputs: &BinInputs) -> Result<FakeBin, EstimateError> {
    let combined = estimate(
        &inputs.region1,
        &inputs.region2,
        inputs.double_signal_estimate,
        inputs.double_enriched_count,
    )
    .map_err(|e| e.in_bin(inputs.bin))?;

    let bin = FakeBin::from_estimate(inputs, combined);
    if bin.is_clamped() {
        debug!(
            bin = bin.bin,
            nominal = combined.nominal_value,
            "negative fake estimate clamped to zero"
        );
    }
    Ok(bin)
}

/// Estimate every bin. Fails with the first invalid bin (in bin order).
pub fn estimate_histogram(bins: &[BinInputs]) -> Result<FakeHistogram, EstimateError> {
    let results: Vec<Result<FakeBin, EstimateError>> = bins.par_iter().map(estimate_bin).collect();

    let bins = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(FakeHistogram { bins })
}
