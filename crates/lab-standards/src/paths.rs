//! Standards directory path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "LABREPORT_STANDARDS_DIR";

/// Get the standards root directory.
///
/// Resolution order:
/// 1. `LABREPORT_STANDARDS_DIR` environment variable
/// 2. `standards/` directory relative to workspace root
pub fn standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// Marker definition file.
pub fn markers_path(root: &Path) -> PathBuf {
    root.join("markers.csv")
}

/// Built-in range table file for a table name (`basic`, `comprehensive`).
pub fn range_table_path(root: &Path, name: &str) -> PathBuf {
    root.join("ranges").join(format!("{name}.csv"))
}

/// Recommendation rule catalog.
pub fn recommendations_path(root: &Path) -> PathBuf {
    root.join("recommendations.toml")
}
