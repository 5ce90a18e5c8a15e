#![deny(unsafe_code)]

pub mod csv_utils;
pub mod doctor;
pub mod error;
pub mod markers;
pub mod paths;
pub mod ranges;
pub mod recommendations;

pub use crate::doctor::DoctorReport;
pub use crate::error::StandardsError;
pub use crate::markers::{load_default_marker_definitions, load_marker_definitions};
pub use crate::paths::{STANDARDS_ENV_VAR, standards_root};
pub use crate::ranges::{
    RangeTableVersion, load_builtin_range_table, load_default_range_table, load_range_table,
};
pub use crate::recommendations::{
    CATALOG_SCHEMA, CATALOG_SCHEMA_VERSION, RecommendationCatalog, RecommendationRule,
    load_default_recommendations, load_recommendations,
};
