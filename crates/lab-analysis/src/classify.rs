//! Range classification.

use lab_model::{AnalysisRow, MarkerSet, RangeTable, Status};
use tracing::debug;

/// Classify every extracted marker that has a reference range.
///
/// Rows follow the marker set order. Markers without a range in `table`
/// are dropped.
pub fn classify(markers: &MarkerSet, table: &RangeTable) -> Vec<AnalysisRow> {
    let mut rows = Vec::with_capacity(markers.len());
    for value in markers {
        let Some(range) = table.get(&value.marker) else {
            debug!(
                marker = %value.marker,
                table = %table.name,
                "no reference range, marker dropped"
            );
            continue;
        };
        rows.push(AnalysisRow {
            marker: value.marker.clone(),
            value: value.value,
            unit: range.unit.clone(),
            range: range.display_range(),
            status: Status::classify(value.value, range),
            comparator: value.comparator,
        });
    }
    rows
}

/// Rows whose status is LOW or HIGH.
pub fn abnormal_rows(rows: &[AnalysisRow]) -> Vec<&AnalysisRow> {
    rows.iter().filter(|row| row.status.is_abnormal()).collect()
}
