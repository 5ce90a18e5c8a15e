//! Marker definition loading.

use std::collections::BTreeSet;
use std::path::Path;

use lab_model::MarkerDefinition;

use crate::csv_utils::{get_field, get_optional, parse_flag, read_csv_rows};
use crate::error::{Result, StandardsError};
use crate::paths::{markers_path, standards_root};

const LABEL_SEPARATOR: char = ';';

/// Load marker definitions from `<standards>/markers.csv`.
pub fn load_default_marker_definitions() -> Result<Vec<MarkerDefinition>> {
    load_marker_definitions(&markers_path(&standards_root()))
}

/// Load marker definitions from a CSV file with
/// `Marker`, `Labels`, `Case Sensitive`, and `Panel` columns.
///
/// Labels are `;`-separated. The marker name is always recognised as a label.
pub fn load_marker_definitions(path: &Path) -> Result<Vec<MarkerDefinition>> {
    let rows = read_csv_rows(path)?;
    let mut seen = BTreeSet::new();
    let mut definitions = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let name = get_field(row, "Marker");
        if name.is_empty() {
            return Err(StandardsError::invalid_row(path, idx + 2, "missing Marker"));
        }
        if !seen.insert(name.clone()) {
            return Err(StandardsError::DuplicateMarker {
                path: path.to_path_buf(),
                marker: name,
            });
        }
        let labels = get_field(row, "Labels")
            .split(LABEL_SEPARATOR)
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();
        let mut definition = MarkerDefinition::new(name)
            .with_labels(labels)
            .case_sensitive(parse_flag(&get_field(row, "Case Sensitive")));
        if let Some(panel) = get_optional(row, "Panel") {
            definition = definition.with_panel(panel);
        }
        definitions.push(definition);
    }
    tracing::debug!(
        path = %path.display(),
        marker_count = definitions.len(),
        "loaded marker definitions"
    );
    Ok(definitions)
}
