//! Read/write fake background shape files (JSON).
//!
//! A shape file is the portable form of the estimated background:
//! - every bin with its raw estimate and clamped content/error
//! - the integral and its quadrature error
//! - run metadata (label, generation time)
//!
//! The schema is defined by `domain::ShapeFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{FakeHistogram, ShapeFile};
use crate::error::AppError;

/// Histogram name under which the fake background is stored for limit inputs.
pub const SHAPE_NAME: &str = "fakes";

/// Build a shape file record for a histogram.
pub fn shape_from_histogram(histogram: &FakeHistogram, label: &str) -> ShapeFile {
    ShapeFile {
        tool: "fakes".to_string(),
        generated: Utc::now(),
        label: label.to_string(),
        name: SHAPE_NAME.to_string(),
        integral: histogram.integral(),
        integral_error: histogram.integral_error(),
        bins: histogram.bins.clone(),
    }
}

/// Write a shape JSON file.
pub fn write_shape_json(path: &Path, histogram: &FakeHistogram, label: &str) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create shape JSON '{}': {e}", path.display())))?;

    let shape = shape_from_histogram(histogram, label);
    serde_json::to_writer_pretty(file, &shape)
        .map_err(|e| AppError::new(2, format!("Failed to write shape JSON: {e}")))?;

    Ok(())
}

/// Read a shape JSON file.
pub fn read_shape_json(path: &Path) -> Result<ShapeFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open shape JSON '{}': {e}", path.display())))?;
    let shape: ShapeFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid shape JSON: {e}")))?;
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CombinedEstimate, FakeBin};

    #[test]
    fn shape_file_survives_disk() {
        let histogram = FakeHistogram {
            bins: vec![FakeBin {
                bin: 2,
                low_edge: Some(20.0),
                high_edge: Some(40.0),
                estimate: CombinedEstimate {
                    nominal_value: 11.0,
                    standard_deviation: 1.0,
                },
                content: 11.0,
                error: 1.0,
            }],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fakes.json");
        write_shape_json(&path, &histogram, "mmt ss mass").unwrap();

        let shape = read_shape_json(&path).unwrap();
        assert_eq!(shape.name, SHAPE_NAME);
        assert_eq!(shape.label, "mmt ss mass");
        assert!((shape.integral - 11.0).abs() < 1e-12);
        assert_eq!(shape.histogram(), histogram);
    }

    #[test]
    fn invalid_json_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = read_shape_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
