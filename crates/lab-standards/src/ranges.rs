//! Reference range tables.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use lab_model::{RangeTable, ReferenceRange};

use crate::csv_utils::{get_field, read_csv_rows};
use crate::error::{Result, StandardsError};
use crate::paths::{range_table_path, standards_root};

/// Built-in reference range tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RangeTableVersion {
    /// Complete blood count only (9 markers).
    #[default]
    Basic,
    /// CBC, differential, metabolic panel, lipids, thyroid, and iron studies.
    Comprehensive,
}

impl RangeTableVersion {
    pub const ALL: [RangeTableVersion; 2] =
        [RangeTableVersion::Basic, RangeTableVersion::Comprehensive];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeTableVersion::Basic => "basic",
            RangeTableVersion::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for RangeTableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeTableVersion {
    type Err = StandardsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(RangeTableVersion::Basic),
            "comprehensive" => Ok(RangeTableVersion::Comprehensive),
            other => Err(StandardsError::UnknownRangeTable {
                name: other.to_string(),
            }),
        }
    }
}

/// Load a built-in range table from the default standards directory.
pub fn load_default_range_table(version: RangeTableVersion) -> Result<RangeTable> {
    load_builtin_range_table(&standards_root(), version)
}

/// Load a built-in range table from a standards directory.
pub fn load_builtin_range_table(root: &Path, version: RangeTableVersion) -> Result<RangeTable> {
    let path = range_table_path(root, version.as_str());
    load_range_table(&path, version.as_str())
}

/// Load a range table CSV with `Marker`, `Low`, `High`, and `Unit` columns.
pub fn load_range_table(path: &Path, name: &str) -> Result<RangeTable> {
    let rows = read_csv_rows(path)?;
    let mut seen = BTreeSet::new();
    let mut ranges = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let line = idx + 2;
        let marker = get_field(row, "Marker");
        if marker.is_empty() {
            return Err(StandardsError::invalid_row(path, line, "missing Marker"));
        }
        if !seen.insert(marker.clone()) {
            return Err(StandardsError::DuplicateMarker {
                path: path.to_path_buf(),
                marker,
            });
        }
        let low = parse_bound(path, line, &marker, "Low", &get_field(row, "Low"))?;
        let high = parse_bound(path, line, &marker, "High", &get_field(row, "High"))?;
        let range = ReferenceRange::new(marker, low, high, get_field(row, "Unit"))
            .map_err(|error| StandardsError::invalid_row(path, line, error.to_string()))?;
        ranges.push(range);
    }
    tracing::debug!(
        path = %path.display(),
        table = name,
        range_count = ranges.len(),
        "loaded range table"
    );
    Ok(RangeTable::new(name, ranges))
}

fn parse_bound(path: &Path, line: usize, marker: &str, column: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>().map_err(|_| {
        StandardsError::invalid_row(
            path,
            line,
            format!("{column} bound for {marker} is not a number: {raw:?}"),
        )
    })
}
