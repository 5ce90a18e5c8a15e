//! Classification results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::marker::Comparator;
use crate::range::ReferenceRange;

/// Position of a value relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Normal,
    Low,
    High,
}

impl Status {
    /// Compare `value` against `[low, high]`, bounds inclusive.
    pub fn classify(value: f64, range: &ReferenceRange) -> Self {
        if value < range.low {
            Status::Low
        } else if value > range.high {
            Status::High
        } else {
            Status::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "NORMAL",
            Status::Low => "LOW",
            Status::High => "HIGH",
        }
    }

    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Status::Normal)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" => Ok(Status::Normal),
            "LOW" => Ok(Status::Low),
            "HIGH" => Ok(Status::High),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// One classified marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRow {
    pub marker: String,
    pub value: f64,
    pub unit: String,
    /// Printed range, e.g. `3.4-10.8`.
    pub range: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Comparator>,
}

impl AnalysisRow {
    pub fn display_value(&self) -> String {
        match self.comparator {
            Some(comparator) => format!("{}{}", comparator.symbol(), self.value),
            None => self.value.to_string(),
        }
    }
}
