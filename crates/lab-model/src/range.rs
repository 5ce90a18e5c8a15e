//! Reference ranges.

use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

/// Normal interval `[low, high]` for one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub marker: String,
    pub low: f64,
    pub high: f64,
    pub unit: String,
}

impl ReferenceRange {
    pub fn new(
        marker: impl Into<String>,
        low: f64,
        high: f64,
        unit: impl Into<String>,
    ) -> Result<Self> {
        let marker = marker.into();
        if low > high || low.is_nan() || high.is_nan() {
            return Err(LabError::InvalidRange { marker, low, high });
        }
        Ok(Self {
            marker,
            low,
            high,
            unit: unit.into(),
        })
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Range as printed in reports, e.g. `13.0-17.7`.
    pub fn display_range(&self) -> String {
        format!("{}-{}", format_bound(self.low), format_bound(self.high))
    }
}

/// Format a bound with at least one decimal place.
pub fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Hand-curated table of reference ranges, in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeTable {
    /// Table label (e.g., "basic", or the file name of a custom table).
    pub name: String,
    pub ranges: Vec<ReferenceRange>,
}

impl RangeTable {
    pub fn new(name: impl Into<String>, ranges: Vec<ReferenceRange>) -> Self {
        Self {
            name: name.into(),
            ranges,
        }
    }

    pub fn get(&self, marker: &str) -> Option<&ReferenceRange> {
        self.ranges.iter().find(|range| range.marker == marker)
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.get(marker).is_some()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
