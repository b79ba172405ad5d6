//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the fake background estimate
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{BinArgs, Command, EstimateArgs, ShowArgs};
use crate::domain::EstimateConfig;
use crate::error::AppError;

pub mod pipeline;

/// Environment variable holding the log filter (falls back to `RUST_LOG`).
pub const LOG_ENV: &str = "FAKES_LOG";

/// Entry point for the `fakes` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Estimate(args) => handle_estimate(args),
        Command::Bin(args) => handle_bin(args),
        Command::Show(args) => handle_show(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Logs go to stderr so stdout stays usable in scripts.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = estimate_config_from_args(&args);
    let run = pipeline::run_estimate(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(
            &run.histogram,
            &config.label,
            &config.input_path.display().to_string()
        )
    );
    println!("{}", crate::report::format_bin_table(&run.histogram));

    if config.plot {
        println!("{}", crate::plot::render_histogram(&run.histogram, config.plot_width));
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.histogram)?;
        info!(path = %path.display(), "wrote per-bin results");
    }
    if let Some(path) = &config.export_shape {
        crate::io::shape::write_shape_json(path, &run.histogram, &config.label)?;
        info!(path = %path.display(), "wrote shape JSON");
    }

    Ok(())
}

fn handle_bin(args: BinArgs) -> Result<(), AppError> {
    let inputs = args.to_inputs();
    let estimate = crate::estimate::estimate(
        &inputs.region1,
        &inputs.region2,
        inputs.double_signal_estimate,
        inputs.double_enriched_count,
    )?;

    print!("{}", crate::report::format_estimate(&estimate));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let shape = crate::io::shape::read_shape_json(&args.shape)?;
    let histogram = shape.histogram();

    let source = format!("{} ({} generated {})", args.shape.display(), shape.name, shape.generated.to_rfc3339());
    println!("{}", crate::report::format_run_summary(&histogram, &shape.label, &source));
    println!("{}", crate::report::format_bin_table(&histogram));

    if !args.no_plot {
        println!("{}", crate::plot::render_histogram(&histogram, args.width));
    }
    Ok(())
}

pub fn estimate_config_from_args(args: &EstimateArgs) -> EstimateConfig {
    EstimateConfig {
        input_path: args.input.clone(),
        label: args.label.clone(),
        plot: !args.no_plot,
        plot_width: args.width,
        export_results: args.export.clone(),
        export_shape: args.export_shape.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_from_args() {
        let args = EstimateArgs {
            input: PathBuf::from("bins.csv"),
            label: "emt os".to_string(),
            no_plot: true,
            width: 80,
            export: Some(PathBuf::from("out.csv")),
            export_shape: None,
        };
        let config = estimate_config_from_args(&args);
        assert_eq!(config.input_path, PathBuf::from("bins.csv"));
        assert_eq!(config.label, "emt os");
        assert!(!config.plot);
        assert_eq!(config.plot_width, 80);
        assert_eq!(config.export_results, Some(PathBuf::from("out.csv")));
        assert!(config.export_shape.is_none());
    }
}
