//! Shared CSV utilities for loading standards files.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, StandardsError};

/// Read a CSV file into a vector of row maps.
///
/// Each row is represented as a BTreeMap with column headers as keys.
/// Handles BOM characters and trims whitespace from values.
pub fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>> {
    if !path.is_file() {
        return Err(StandardsError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        ));
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|error| StandardsError::csv(path, &error))?;

    let headers = reader
        .headers()
        .map_err(|error| StandardsError::csv(path, &error))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| StandardsError::csv(path, &error))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .trim()
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Get a field value from a row, returning empty string if not present.
pub fn get_field(row: &BTreeMap<String, String>, key: &str) -> String {
    row.get(key).cloned().unwrap_or_default()
}

/// Get an optional field value from a row (None if empty or missing).
pub fn get_optional(row: &BTreeMap<String, String>, key: &str) -> Option<String> {
    row.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Interpret a Yes/No style flag.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}
