use std::collections::BTreeSet;

use lab_analysis::resolve_recommendations;
use lab_model::{AnalysisRow, RecommendationCategory, Status};
use lab_standards::{RecommendationCatalog, load_default_recommendations};
use proptest::prelude::*;

fn row(marker: &str, status: Status) -> AnalysisRow {
    AnalysisRow {
        marker: marker.to_string(),
        value: 1.0,
        unit: "u".to_string(),
        range: "0.0-2.0".to_string(),
        status,
        comparator: None,
    }
}

fn catalog() -> RecommendationCatalog {
    load_default_recommendations().expect("load recommendations")
}

#[test]
fn normal_rows_produce_no_recommendations() {
    let rows = vec![row("WBC", Status::Normal), row("TSH", Status::Normal)];
    assert!(resolve_recommendations(&rows, &catalog()).is_empty());
}

#[test]
fn specific_rule_is_used() {
    let catalog = catalog();
    let bundle = resolve_recommendations(&[row("TSH", Status::High)], &catalog);
    assert_eq!(&bundle, catalog.lookup("TSH", Status::High).unwrap());
}

#[test]
fn missing_rule_falls_back_to_default() {
    let catalog = catalog();
    let bundle = resolve_recommendations(&[row("WBC", Status::High)], &catalog);
    assert_eq!(bundle, catalog.default);
}

#[test]
fn union_collapses_duplicates() {
    let catalog = catalog();
    // Both rules recommend "Avoid iodine supplements".
    let bundle = resolve_recommendations(
        &[row("TSH", Status::High), row("Free T3", Status::High)],
        &catalog,
    );
    let tsh = catalog.lookup("TSH", Status::High).unwrap();
    let t3 = catalog.lookup("Free T3", Status::High).unwrap();
    for category in RecommendationCategory::ALL {
        let expected: BTreeSet<&String> = tsh
            .category(category)
            .iter()
            .chain(t3.category(category))
            .collect();
        assert_eq!(bundle.category(category).len(), expected.len());
    }
    assert_eq!(
        bundle
            .contraindications
            .iter()
            .filter(|entry| *entry == "Avoid iodine supplements")
            .count(),
        1
    );
}

fn abnormal_row_strategy() -> impl Strategy<Value = AnalysisRow> {
    let markers = prop::sample::select(vec![
        "TSH", "Iron", "TIBC", "Free T3", "Hemoglobin", "Glucose", "WBC", "Platelets",
    ]);
    let status = prop::sample::select(vec![Status::Low, Status::High]);
    (markers, status).prop_map(|(marker, status)| row(marker, status))
}

proptest! {
    #[test]
    fn aggregation_is_order_independent(
        rows in proptest::collection::vec(abnormal_row_strategy(), 0..8),
    ) {
        let catalog = catalog();
        let forward = resolve_recommendations(&rows, &catalog);
        let mut reversed_rows = rows.clone();
        reversed_rows.reverse();
        let reversed = resolve_recommendations(&reversed_rows, &catalog);
        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn aggregation_is_idempotent(
        rows in proptest::collection::vec(abnormal_row_strategy(), 0..8),
    ) {
        let catalog = catalog();
        let once = resolve_recommendations(&rows, &catalog);
        let mut doubled = rows.clone();
        doubled.extend(rows.iter().cloned());
        let twice = resolve_recommendations(&doubled, &catalog);
        prop_assert_eq!(once, twice);
    }
}
