use lab_analysis::{abnormal_rows, classify};
use lab_model::{MarkerSet, MarkerValue, RangeTable, ReferenceRange, Status};
use lab_standards::{RangeTableVersion, load_default_range_table};
use proptest::prelude::*;

fn marker_set(values: &[(&str, f64)]) -> MarkerSet {
    values
        .iter()
        .map(|(marker, value)| MarkerValue::new(*marker, *value))
        .collect()
}

#[test]
fn classifies_against_first_range_table() {
    let table = load_default_range_table(RangeTableVersion::Basic).unwrap();
    let rows = classify(&marker_set(&[("WBC", 11.5), ("Hemoglobin", 12.0)]), &table);

    assert_eq!(rows.len(), 2);
    assert_eq!(
        (rows[0].marker.as_str(), rows[0].value, rows[0].status),
        ("WBC", 11.5, Status::High)
    );
    assert_eq!(rows[0].range, "3.4-10.8");
    assert_eq!(rows[0].unit, "x10E3/uL");
    assert_eq!(
        (rows[1].marker.as_str(), rows[1].value, rows[1].status),
        ("Hemoglobin", 12.0, Status::Low)
    );
    assert_eq!(rows[1].range, "13.0-17.7");
}

#[test]
fn markers_without_range_are_dropped() {
    let table = load_default_range_table(RangeTableVersion::Basic).unwrap();
    let rows = classify(&marker_set(&[("TSH", 9.0), ("Platelets", 200.0)]), &table);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].marker, "Platelets");
    assert_eq!(rows[0].status, Status::Normal);
}

#[test]
fn empty_marker_set_gives_no_rows() {
    let table = load_default_range_table(RangeTableVersion::Comprehensive).unwrap();
    assert!(classify(&MarkerSet::new(), &table).is_empty());
}

#[test]
fn abnormal_rows_filters_normal() {
    let table = load_default_range_table(RangeTableVersion::Basic).unwrap();
    let rows = classify(
        &marker_set(&[("WBC", 6.0), ("RBC", 3.9), ("Platelets", 480.0)]),
        &table,
    );
    let abnormal: Vec<&str> = abnormal_rows(&rows)
        .into_iter()
        .map(|row| row.marker.as_str())
        .collect();
    assert_eq!(abnormal, vec!["RBC", "Platelets"]);
}

fn table_with(low: f64, high: f64) -> RangeTable {
    RangeTable::new(
        "test",
        vec![ReferenceRange::new("X", low, high, "u").unwrap()],
    )
}

fn status_of(value: f64, low: f64, high: f64) -> Status {
    let rows = classify(&marker_set(&[("X", value)]), &table_with(low, high));
    rows[0].status
}

proptest! {
    #[test]
    fn bounds_are_normal(low in 0.0f64..500.0, width in 0.0f64..500.0) {
        let high = low + width;
        prop_assert_eq!(status_of(low, low, high), Status::Normal);
        prop_assert_eq!(status_of(high, low, high), Status::Normal);
    }

    #[test]
    fn one_unit_outside_is_abnormal(low in 1.0f64..500.0, width in 0.0f64..500.0) {
        let high = low + width;
        prop_assert_eq!(status_of(low - 1.0, low, high), Status::Low);
        prop_assert_eq!(status_of(high + 1.0, low, high), Status::High);
    }

    #[test]
    fn bundled_tables_classify_their_own_bounds_as_normal(index in 0usize..38) {
        let table = load_default_range_table(RangeTableVersion::Comprehensive).unwrap();
        let range = &table.ranges[index % table.len()];
        let rows = classify(&marker_set(&[(range.marker.as_str(), range.low)]), &table);
        prop_assert_eq!(rows[0].status, Status::Normal);
        let rows = classify(&marker_set(&[(range.marker.as_str(), range.high)]), &table);
        prop_assert_eq!(rows[0].status, Status::Normal);
        let rows = classify(&marker_set(&[(range.marker.as_str(), range.high + 1.0)]), &table);
        prop_assert_eq!(rows[0].status, Status::High);
    }
}
