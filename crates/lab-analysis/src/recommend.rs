//! Recommendation lookup and aggregation.

use lab_model::{AnalysisRow, RecommendationBundle};
use lab_standards::RecommendationCatalog;

/// Union of the recommendations for every abnormal row.
///
/// Each abnormal row contributes its (marker, status) rule, or the catalog's
/// default bundle when no rule exists. Normal rows contribute nothing, so a
/// report with no abnormal rows has an empty bundle.
pub fn resolve_recommendations(
    rows: &[AnalysisRow],
    catalog: &RecommendationCatalog,
) -> RecommendationBundle {
    let mut bundle = RecommendationBundle::new();
    for row in rows.iter().filter(|row| row.status.is_abnormal()) {
        let source = match catalog.lookup(&row.marker, row.status) {
            Some(specific) => specific,
            None => {
                tracing::debug!(
                    marker = %row.marker,
                    status = %row.status,
                    "no specific recommendations, using default bundle"
                );
                &catalog.default
            }
        };
        bundle.merge(source);
    }
    bundle
}
