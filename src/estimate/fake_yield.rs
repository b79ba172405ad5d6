//! Fake background yield for a single histogram bin.
//!
//! Two single-object fake-enriched regions are extrapolated into the signal
//! region with a QCD/EWK-weighted fake rate:
//!
//! ```text
//! f      = (n_123 / N_123 · c_123) / (N_en / N_en · c_en)    (QCD fraction)
//! Y_i    = c_en · ((1 − f) · S_ewk + f · S_qcd)
//! Y_12   = S_12 · c_12
//! Y      = Y_1 + Y_2 − Y_12
//! ```
//!
//! where each `c` is a relative counting factor `1 ± 1/sqrt(n)`. For
//! `N_en = 100, n_123 = 5, N_123 = 50` the central fraction is
//! `(5/50)/(100/100) = 0.1`. The
//! double-fake extrapolation is subtracted because both single-object
//! estimates already contain it.
//!
//! Every counting factor is its own independent source. `c_en` appears twice
//! in `Y_i` and stays correlated with itself; sources belonging to different
//! regions are combined as uncorrelated even though the triple-fake sample is
//! shared between them.

use tracing::trace;

use crate::domain::{CombinedEstimate, RegionYield};
use crate::error::EstimateError;
use crate::math::{Measurement, SourceId};

/// Uncertainty sources owned by one single-object region.
#[derive(Debug, Clone, Copy)]
struct RegionSources {
    label: &'static str,
    enriched: SourceId,
    triple: SourceId,
}

const REGION1: RegionSources = RegionSources {
    label: "region1",
    enriched: SourceId("region1.enriched"),
    triple: SourceId("region1.triple_enriched"),
};

const REGION2: RegionSources = RegionSources {
    label: "region2",
    enriched: SourceId("region2.enriched"),
    triple: SourceId("region2.triple_enriched"),
};

const DOUBLE: SourceId = SourceId("double.enriched");

/// Combine the two single-object estimates and the double-object estimate.
///
/// Returns the signed nominal value; callers decide whether to clamp.
pub fn estimate(
    region1: &RegionYield,
    region2: &RegionYield,
    double_signal_estimate: f64,
    double_enriched_count: f64,
) -> Result<CombinedEstimate, EstimateError> {
    validate_region(region1, REGION1.label)?;
    validate_region(region2, REGION2.label)?;
    ensure_non_negative("double_signal_estimate", double_signal_estimate)?;
    ensure_non_negative("double_enriched_count", double_enriched_count)?;

    let fake1 = region_estimate(region1, REGION1);
    let fake2 = region_estimate(region2, REGION2);
    let double = double_estimate(double_signal_estimate, double_enriched_count);
    trace!(
        fake1 = fake1.nominal(),
        fake2 = fake2.nominal(),
        double = double.nominal(),
        "fake yield components"
    );

    let total = fake1 + fake2 - double;
    Ok(CombinedEstimate {
        nominal_value: total.nominal(),
        standard_deviation: total.std_dev(),
    })
}

/// QCD fraction of a single-object enriched region, with its uncertainty.
///
/// Zero when either the region or the triple-fake region is empty. The
/// uncertainty terms carry the region-1 source ids.
pub(crate) fn qcd_fraction(region: &RegionYield) -> Measurement {
    qcd_fraction_with(region, REGION1)
}

fn qcd_fraction_with(region: &RegionYield, sources: RegionSources) -> Measurement {
    if region.enriched_count == 0.0 || region.triple_fake_enriched_count == 0.0 {
        return Measurement::exact(0.0);
    }
    let c_en = Measurement::relative_counting(region.enriched_count, sources.enriched);
    let c_triple = Measurement::relative_counting(region.triple_fake_enriched_count, sources.triple);

    // The enriched count normalised to itself is 1, so only its counting factor remains.
    let triple_fraction = region.triple_fake_fraction_numerator / region.triple_fake_enriched_count;
    (triple_fraction * c_triple) / c_en
}

fn region_estimate(region: &RegionYield, sources: RegionSources) -> Measurement {
    if region.enriched_count == 0.0 {
        return Measurement::exact(0.0);
    }
    let c_en = Measurement::relative_counting(region.enriched_count, sources.enriched);
    let f = qcd_fraction_with(region, sources);

    c_en * ((1.0 - f.clone()) * region.signal_estimate_ewk + f * region.signal_estimate_qcd)
}

fn double_estimate(signal: f64, enriched_count: f64) -> Measurement {
    if enriched_count == 0.0 {
        return Measurement::exact(0.0);
    }
    signal * Measurement::relative_counting(enriched_count, DOUBLE)
}

fn validate_region(region: &RegionYield, label: &str) -> Result<(), EstimateError> {
    let fields = [
        ("enriched_count", region.enriched_count),
        ("signal_estimate_ewk", region.signal_estimate_ewk),
        ("signal_estimate_qcd", region.signal_estimate_qcd),
        ("triple_fake_fraction_numerator", region.triple_fake_fraction_numerator),
        ("triple_fake_enriched_count", region.triple_fake_enriched_count),
    ];
    for (name, value) in fields {
        if !is_valid(value) {
            return Err(EstimateError::invalid(format!("{label}.{name}"), value));
        }
    }
    // Triple fakes cannot be extrapolated out of an empty triple-fake region.
    if region.triple_fake_enriched_count == 0.0 && region.triple_fake_fraction_numerator > 0.0 {
        return Err(EstimateError::invalid(
            format!("{label}.triple_fake_fraction_numerator"),
            region.triple_fake_fraction_numerator,
        ));
    }
    Ok(())
}

fn ensure_non_negative(name: &str, value: f64) -> Result<(), EstimateError> {
    if is_valid(value) {
        Ok(())
    } else {
        Err(EstimateError::invalid(name, value))
    }
}

fn is_valid(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
