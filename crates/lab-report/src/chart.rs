//! Bar chart model shared by the SVG and terminal renderings.

use lab_model::{AnalysisRow, Status};

/// Fill color for a status: NORMAL green, LOW amber, HIGH red.
pub fn status_color(status: Status) -> &'static str {
    match status {
        Status::Normal => "#2e7d32",
        Status::Low => "#f9a825",
        Status::High => "#c62828",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub marker: String,
    pub value: f64,
    /// Value as printed, including any comparator.
    pub label: String,
    pub status: Status,
}

impl Bar {
    pub fn color(&self) -> &'static str {
        status_color(self.status)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub const DEFAULT_TITLE: &'static str = "Lab Results Overview";

    /// One bar per row, in row order.
    pub fn from_rows(rows: &[AnalysisRow]) -> Self {
        let bars = rows
            .iter()
            .map(|row| Bar {
                marker: row.marker.clone(),
                value: row.value,
                label: row.display_value(),
                status: row.status,
            })
            .collect();
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Largest bar value, or 0 when there are no positive values.
    pub fn max_value(&self) -> f64 {
        self.bars
            .iter()
            .map(|bar| bar.value)
            .fold(0.0_f64, f64::max)
    }
}

/// Block-character bar of at most `width` cells, scaled against `max`.
///
/// Positive values always get at least one cell.
pub fn text_bar(value: f64, max: f64, width: usize) -> String {
    if width == 0 || max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let fraction = (value / max).min(1.0);
    let cells = ((fraction * width as f64).round() as usize).clamp(1, width);
    "█".repeat(cells)
}
