//! Bin table ingest.
//!
//! A bin table is a CSV with one row per histogram bin (underflow and overflow
//! included). Each row carries the bin contents of every control-region
//! histogram the estimator needs:
//!
//! | column              | histogram       |
//! | ------------------- | --------------- |
//! | `fake1_enriched`    | `fr1en`         |
//! | `fake1_signal_ewk`  | `fr1s_ewk`      |
//! | `fake1_signal_qcd`  | `fr1s_qcd`      |
//! | `fake1_triple_qcd`  | `fr123en1_qcd`  |
//! | `fake2_enriched`    | `fr2en`         |
//! | `fake2_signal_ewk`  | `fr2s_ewk`      |
//! | `fake2_signal_qcd`  | `fr2s_qcd`      |
//! | `fake2_triple_qcd`  | `fr123en2_qcd`  |
//! | `triple_enriched`   | `fr123en`       |
//! | `double_signal`     | `fr12s_qcd`     |
//! | `double_enriched`   | `fr12en`        |
//!
//! Histogram names are accepted as header aliases. `bin` is required;
//! `low_edge`/`high_edge` are optional.
//!
//! Values are only checked for being finite numbers here. Negative contents
//! are left for the estimator to reject, so the error names the field.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{BinInputs, RegionYield};
use crate::error::AppError;

/// Required value columns: (canonical name, histogram alias).
const VALUE_COLUMNS: [(&str, &str); 11] = [
    ("fake1_enriched", "fr1en"),
    ("fake1_signal_ewk", "fr1s_ewk"),
    ("fake1_signal_qcd", "fr1s_qcd"),
    ("fake1_triple_qcd", "fr123en1_qcd"),
    ("fake2_enriched", "fr2en"),
    ("fake2_signal_ewk", "fr2s_ewk"),
    ("fake2_signal_qcd", "fr2s_qcd"),
    ("fake2_triple_qcd", "fr123en2_qcd"),
    ("triple_enriched", "fr123en"),
    ("double_signal", "fr12s_qcd"),
    ("double_enriched", "fr12en"),
];

/// Ingest output: bins sorted by index.
#[derive(Debug, Clone)]
pub struct BinTable {
    pub bins: Vec<BinInputs>,
}

/// Load a bin table from a CSV file.
pub fn load_bin_table(path: &Path) -> Result<BinTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open bin table '{}': {e}", path.display())))?;
    info!(path = %path.display(), "reading bin table");
    read_bin_table(file)
}

/// Parse a bin table from any reader.
pub fn read_bin_table<R: Read>(input: R) -> Result<BinTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read bin table headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut bins: Vec<BinInputs> = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; CSV lines are 1-based.
        let line = idx + 2;

        let record = result.map_err(|e| AppError::new(2, format!("Line {line}: CSV parse error: {e}")))?;
        let bin = parse_row(&record, &header_map).map_err(|e| AppError::new(2, format!("Line {line}: {e}")))?;
        bins.push(bin);
    }

    if bins.is_empty() {
        return Err(AppError::new(3, "Bin table contains no rows."));
    }

    bins.sort_by_key(|b| b.bin);
    if let Some(dup) = bins.windows(2).find(|w| w[0].bin == w[1].bin) {
        return Err(AppError::new(3, format!("Duplicate bin index {} in bin table.", dup[0].bin)));
    }

    debug!(rows = bins.len(), "bin table parsed");
    Ok(BinTable { bins })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map: HashMap<String, usize> = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        let name = normalize_header_name(name);
        let canonical = VALUE_COLUMNS
            .iter()
            .find(|(_, alias)| *alias == name)
            .map(|(canonical, _)| canonical.to_string())
            .unwrap_or(name);
        map.entry(canonical).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = std::iter::once("bin")
        .chain(VALUE_COLUMNS.iter().map(|(canonical, _)| *canonical))
        .filter(|name| !header_map.contains_key(*name))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::new(
            2,
            format!("Bin table is missing required column(s): {}", missing.join(", ")),
        ))
    }
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<BinInputs, String> {
    let bin_raw = get_required(record, header_map, "bin")?;
    let bin = bin_raw
        .parse::<usize>()
        .map_err(|_| format!("Invalid bin index '{bin_raw}' (expected a non-negative integer)."))?;

    let value = |name: &str| -> Result<f64, String> { parse_f64(get_required(record, header_map, name)?, name) };

    let triple_enriched = value("triple_enriched")?;
    let region1 = RegionYield {
        enriched_count: value("fake1_enriched")?,
        signal_estimate_ewk: value("fake1_signal_ewk")?,
        signal_estimate_qcd: value("fake1_signal_qcd")?,
        triple_fake_fraction_numerator: value("fake1_triple_qcd")?,
        triple_fake_enriched_count: triple_enriched,
    };
    let region2 = RegionYield {
        enriched_count: value("fake2_enriched")?,
        signal_estimate_ewk: value("fake2_signal_ewk")?,
        signal_estimate_qcd: value("fake2_signal_qcd")?,
        triple_fake_fraction_numerator: value("fake2_triple_qcd")?,
        triple_fake_enriched_count: triple_enriched,
    };

    Ok(BinInputs {
        bin,
        low_edge: parse_optional(get_optional(record, header_map, "low_edge"), "low_edge")?,
        high_edge: parse_optional(get_optional(record, header_map, "high_edge"), "high_edge")?,
        region1,
        region2,
        double_signal_estimate: value("double_signal")?,
        double_enriched_count: value("double_enriched")?,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid number '{s}' in column `{name}`."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite value '{s}' in column `{name}`."))
    }
}

fn parse_optional(s: Option<&str>, name: &str) -> Result<Option<f64>, String> {
    s.map(|s| parse_f64(s, name)).transpose()
}
