//! Command-line parsing for the fake background estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BinInputs, RegionYield};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fakes", version, about = "Fake background yield estimator for trilepton VH searches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the fake background for every bin of a bin table.
    Estimate(EstimateArgs),
    /// Estimate a single bin from explicit region contents.
    Bin(BinArgs),
    /// Print a previously exported shape JSON.
    Show(ShowArgs),
}

/// Options for a full histogram estimate.
#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// Bin table CSV (one row per histogram bin).
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: PathBuf,

    /// Label printed in reports and stored in the shape file.
    #[arg(short = 'l', long, default_value = "")]
    pub label: String,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Export per-bin results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fake background shape to JSON.
    #[arg(long = "export-shape")]
    pub export_shape: Option<PathBuf>,
}

/// Contents of both single-object fake-enriched regions.
#[derive(Debug, Args, Clone)]
pub struct RegionArgs {
    /// Events in fake-object #1 enriched region.
    #[arg(long = "en1", default_value_t = 0.0, allow_negative_numbers = true)]
    pub en1: f64,
    /// Signal estimate from region #1 with EWK fake rates.
    #[arg(long = "ewk1", default_value_t = 0.0, allow_negative_numbers = true)]
    pub ewk1: f64,
    /// Signal estimate from region #1 with QCD fake rates.
    #[arg(long = "qcd1", default_value_t = 0.0, allow_negative_numbers = true)]
    pub qcd1: f64,
    /// Triple fakes extrapolated into region #1.
    #[arg(long = "triple1", default_value_t = 0.0, allow_negative_numbers = true)]
    pub triple1: f64,

    /// Events in fake-object #2 enriched region.
    #[arg(long = "en2", default_value_t = 0.0, allow_negative_numbers = true)]
    pub en2: f64,
    /// Signal estimate from region #2 with EWK fake rates.
    #[arg(long = "ewk2", default_value_t = 0.0, allow_negative_numbers = true)]
    pub ewk2: f64,
    /// Signal estimate from region #2 with QCD fake rates.
    #[arg(long = "qcd2", default_value_t = 0.0, allow_negative_numbers = true)]
    pub qcd2: f64,
    /// Triple fakes extrapolated into region #2.
    #[arg(long = "triple2", default_value_t = 0.0, allow_negative_numbers = true)]
    pub triple2: f64,

    /// Events in the triple-fake enriched region.
    #[arg(long = "triple-en", default_value_t = 0.0, allow_negative_numbers = true)]
    pub triple_en: f64,
}

/// Options for a single-bin estimate.
#[derive(Debug, Parser, Clone)]
pub struct BinArgs {
    #[command(flatten)]
    pub regions: RegionArgs,

    /// Signal estimate from the double-fake enriched region.
    #[arg(long = "double-signal", default_value_t = 0.0, allow_negative_numbers = true)]
    pub double_signal: f64,

    /// Events in the double-fake enriched region.
    #[arg(long = "double-en", default_value_t = 0.0, allow_negative_numbers = true)]
    pub double_en: f64,
}

impl BinArgs {
    pub fn to_inputs(&self) -> BinInputs {
        let r = &self.regions;
        BinInputs {
            bin: 0,
            low_edge: None,
            high_edge: None,
            region1: RegionYield {
                enriched_count: r.en1,
                signal_estimate_ewk: r.ewk1,
                signal_estimate_qcd: r.qcd1,
                triple_fake_fraction_numerator: r.triple1,
                triple_fake_enriched_count: r.triple_en,
            },
            region2: RegionYield {
                enriched_count: r.en2,
                signal_estimate_ewk: r.ewk2,
                signal_estimate_qcd: r.qcd2,
                triple_fake_fraction_numerator: r.triple2,
                triple_fake_enriched_count: r.triple_en,
            },
            double_signal_estimate: self.double_signal,
            double_enriched_count: self.double_en,
        }
    }
}

/// Options for printing a saved shape.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Shape JSON file produced by `fakes estimate --export-shape`.
    #[arg(long, value_name = "JSON")]
    pub shape: PathBuf,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_estimate_command() {
        let cli = Cli::try_parse_from([
            "fakes",
            "estimate",
            "-i",
            "bins.csv",
            "--label",
            "mmt",
            "--no-plot",
            "--export-shape",
            "out.json",
        ])
        .unwrap();
        match cli.command {
            Command::Estimate(args) => {
                assert_eq!(args.input, PathBuf::from("bins.csv"));
                assert_eq!(args.label, "mmt");
                assert!(args.no_plot);
                assert_eq!(args.width, 60);
                assert_eq!(args.export_shape, Some(PathBuf::from("out.json")));
                assert!(args.export.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bin_args_share_the_triple_region() {
        let cli = Cli::try_parse_from([
            "fakes",
            "bin",
            "--en1",
            "100",
            "--ewk1",
            "10",
            "--qcd1",
            "20",
            "--triple1",
            "5",
            "--triple-en",
            "50",
            "--double-signal",
            "-1",
        ])
        .unwrap();
        let Command::Bin(args) = cli.command else {
            panic!("expected bin command");
        };
        let inputs = args.to_inputs();
        assert_eq!(inputs.region1.enriched_count, 100.0);
        assert_eq!(inputs.region1.triple_fake_enriched_count, 50.0);
        assert_eq!(inputs.region2.triple_fake_enriched_count, 50.0);
        assert_eq!(inputs.region2.enriched_count, 0.0);
        assert_eq!(inputs.double_signal_estimate, -1.0);
    }
}
