#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::Path;

use crate::markers::load_marker_definitions;
use crate::paths::{markers_path, recommendations_path};
use crate::ranges::{RangeTableVersion, load_builtin_range_table};
use crate::recommendations::load_recommendations;

/// Consistency report for a standards directory.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub counts: DoctorCounts,
    pub tables: Vec<TableCheck>,
    /// Rule markers that have no marker definition.
    pub orphan_rules: Vec<String>,
    pub problems: Vec<String>,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DoctorCounts {
    pub markers: usize,
    pub rules: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TableCheck {
    pub name: String,
    pub ranges: usize,
    /// Range entries the extractor can never produce.
    pub undefined_markers: Vec<String>,
}

impl DoctorReport {
    /// Load every standards file under `root` and cross-check them.
    ///
    /// Load failures are collected as problems rather than returned.
    pub fn inspect(root: &Path) -> Self {
        let mut problems = Vec::new();
        let mut counts = DoctorCounts::default();

        let defined: BTreeSet<String> = match load_marker_definitions(&markers_path(root)) {
            Ok(definitions) => {
                counts.markers = definitions.len();
                definitions.into_iter().map(|d| d.name).collect()
            }
            Err(error) => {
                problems.push(error.to_string());
                BTreeSet::new()
            }
        };

        let mut tables = Vec::new();
        for version in RangeTableVersion::ALL {
            match load_builtin_range_table(root, version) {
                Ok(table) => {
                    let undefined_markers = table
                        .ranges
                        .iter()
                        .filter(|range| !defined.contains(&range.marker))
                        .map(|range| range.marker.clone())
                        .collect();
                    tables.push(TableCheck {
                        name: table.name,
                        ranges: table.ranges.len(),
                        undefined_markers,
                    });
                }
                Err(error) => problems.push(error.to_string()),
            }
        }

        let mut orphan_rules = Vec::new();
        match load_recommendations(&recommendations_path(root)) {
            Ok(catalog) => {
                counts.rules = catalog.rules.len();
                for rule in &catalog.rules {
                    if !defined.contains(&rule.marker) && !orphan_rules.contains(&rule.marker) {
                        orphan_rules.push(rule.marker.clone());
                    }
                }
            }
            Err(error) => problems.push(error.to_string()),
        }

        Self {
            schema: "labreport.standards-doctor".to_string(),
            schema_version: 1,
            counts,
            tables,
            orphan_rules,
            problems,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.problems.is_empty()
            && self.orphan_rules.is_empty()
            && self.tables.iter().all(|t| t.undefined_markers.is_empty())
    }
}
