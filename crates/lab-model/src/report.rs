use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisRow;
use crate::recommendation::RecommendationBundle;

pub const DISCLAIMER: &str = "These recommendations are for educational purposes only and \
should not be considered medical advice. Always consult with your healthcare provider before \
making any changes to your diet, lifestyle, or supplement regimen.";

/// A marker whose captured text could not be parsed as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionWarning {
    pub marker: String,
    pub raw: String,
    pub message: String,
}

/// Everything produced for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source: String,
    /// SHA-256 of the source document bytes, hex encoded.
    pub source_sha256: String,
    pub generated_at: DateTime<Utc>,
    pub range_table: String,
    pub rows: Vec<AnalysisRow>,
    #[serde(default)]
    pub warnings: Vec<ExtractionWarning>,
    /// Extracted markers the selected range table has no entry for.
    #[serde(default)]
    pub unranged_markers: Vec<String>,
    pub recommendations: RecommendationBundle,
    pub disclaimer: String,
}

impl AnalysisReport {
    pub fn abnormal_rows(&self) -> impl Iterator<Item = &AnalysisRow> {
        self.rows.iter().filter(|row| row.status.is_abnormal())
    }

    pub fn abnormal_count(&self) -> usize {
        self.abnormal_rows().count()
    }
}
