//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - built per histogram bin from ingested bin tables
//! - exported to JSON/CSV
//! - reloaded later for reports and plots
//!
//! All counts are histogram bin contents and therefore `f64`: data-driven
//! extrapolations carry fake-rate weights and are not integral.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contents of one fake-object-enriched control region for a single bin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionYield {
    /// Events observed in the enriched region.
    pub enriched_count: f64,
    /// Signal-region yield extrapolated with the EWK fake rate.
    pub signal_estimate_ewk: f64,
    /// Signal-region yield extrapolated with the QCD fake rate.
    pub signal_estimate_qcd: f64,
    /// Triple-fake events extrapolated into this enriched region (QCD rates).
    pub triple_fake_fraction_numerator: f64,
    /// Events observed in the triple-fake enriched region.
    pub triple_fake_enriched_count: f64,
}

/// Combined fake background yield for one bin.
///
/// `nominal_value` is signed; clamping happens when a [`FakeBin`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedEstimate {
    pub nominal_value: f64,
    pub standard_deviation: f64,
}

impl CombinedEstimate {
    pub const ZERO: CombinedEstimate = CombinedEstimate {
        nominal_value: 0.0,
        standard_deviation: 0.0,
    };
}

/// Everything the estimator needs for one histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinInputs {
    /// Bin index (`0` is underflow, `nbins + 1` overflow).
    pub bin: usize,
    pub low_edge: Option<f64>,
    pub high_edge: Option<f64>,
    pub region1: RegionYield,
    pub region2: RegionYield,
    /// Signal-region yield extrapolated from the double-fake enriched region.
    pub double_signal_estimate: f64,
    /// Events observed in the double-fake enriched region.
    pub double_enriched_count: f64,
}

/// One bin of the fake background histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FakeBin {
    pub bin: usize,
    pub low_edge: Option<f64>,
    pub high_edge: Option<f64>,
    /// Raw estimator output (signed nominal value).
    pub estimate: CombinedEstimate,
    /// Bin content: `max(0, nominal)`.
    pub content: f64,
    /// Bin error: the estimator's standard deviation.
    pub error: f64,
}

impl FakeBin {
    pub fn from_estimate(inputs: &BinInputs, estimate: CombinedEstimate) -> Self {
        Self {
            bin: inputs.bin,
            low_edge: inputs.low_edge,
            high_edge: inputs.high_edge,
            estimate,
            content: estimate.nominal_value.max(0.0),
            error: estimate.standard_deviation,
        }
    }

    /// Whether a negative nominal value was clamped to zero.
    pub fn is_clamped(&self) -> bool {
        self.estimate.nominal_value < 0.0
    }

    /// Human-readable bin range, e.g. `[0, 20)` or `underflow`/`bin 3`.
    pub fn range_label(&self) -> String {
        match (self.low_edge, self.high_edge) {
            (Some(lo), Some(hi)) => format!("[{lo}, {hi})"),
            (Some(lo), None) => format!("[{lo}, inf)"),
            (None, Some(hi)) => format!("(-inf, {hi})"),
            (None, None) => format!("bin {}", self.bin),
        }
    }
}

/// The fake background histogram (bins in ascending index order).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FakeHistogram {
    pub bins: Vec<FakeBin>,
}

impl FakeHistogram {
    /// Sum of (clamped) bin contents.
    pub fn integral(&self) -> f64 {
        self.bins.iter().map(|b| b.content).sum()
    }

    /// Bin errors added in quadrature.
    pub fn integral_error(&self) -> f64 {
        self.bins.iter().map(|b| b.error * b.error).sum::<f64>().sqrt()
    }

    pub fn clamped_bins(&self) -> usize {
        self.bins.iter().filter(|b| b.is_clamped()).count()
    }
}

/// A saved fake background shape (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub label: String,
    /// Histogram name used for limit-setting inputs.
    pub name: String,
    pub integral: f64,
    pub integral_error: f64,
    pub bins: Vec<FakeBin>,
}

impl ShapeFile {
    pub fn histogram(&self) -> FakeHistogram {
        FakeHistogram {
            bins: self.bins.clone(),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct EstimateConfig {
    pub input_path: PathBuf,
    /// Free-form label for reports (channel / category / variable).
    pub label: String,

    pub plot: bool,
    pub plot_width: usize,

    pub export_results: Option<PathBuf>,
    pub export_shape: Option<PathBuf>,
}
