//! Recommendation rule catalog.

use std::collections::BTreeSet;
use std::path::Path;

use lab_model::{RecommendationBundle, Status};
use serde::Deserialize;

use crate::error::{Result, StandardsError};
use crate::paths::{recommendations_path, standards_root};

/// Schema name accepted in the optional `[catalog]` header.
pub const CATALOG_SCHEMA: &str = "labreport.recommendations";
/// Highest catalog schema version this loader understands.
pub const CATALOG_SCHEMA_VERSION: u32 = 1;

/// Recommendations for one (marker, status) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRule {
    pub marker: String,
    pub status: Status,
    pub bundle: RecommendationBundle,
}

/// Static (marker, status) -> bundle table with a generic fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationCatalog {
    pub default: RecommendationBundle,
    pub rules: Vec<RecommendationRule>,
}

impl RecommendationCatalog {
    /// Specific bundle for a marker and status. Marker names compare
    /// ASCII case-insensitively.
    pub fn lookup(&self, marker: &str, status: Status) -> Option<&RecommendationBundle> {
        self.rules
            .iter()
            .find(|rule| rule.status == status && rule.marker.eq_ignore_ascii_case(marker))
            .map(|rule| &rule.bundle)
    }

    /// Specific bundle, or the default bundle when no rule exists.
    pub fn bundle_for(&self, marker: &str, status: Status) -> &RecommendationBundle {
        self.lookup(marker, status).unwrap_or(&self.default)
    }

    /// Parse a catalog from TOML text. `path` is only used in error messages.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text).map_err(|source| StandardsError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(header) = &file.catalog {
            header.check(path)?;
        }
        let mut seen = BTreeSet::new();
        let mut rules = Vec::with_capacity(file.rules.len());
        for entry in file.rules {
            if !entry.status.is_abnormal() {
                return Err(StandardsError::InvalidCatalog {
                    path: path.to_path_buf(),
                    message: format!("rule for {} targets NORMAL", entry.marker),
                });
            }
            if !seen.insert((entry.marker.to_ascii_lowercase(), entry.status)) {
                return Err(StandardsError::InvalidCatalog {
                    path: path.to_path_buf(),
                    message: format!("duplicate rule for {} {}", entry.marker, entry.status),
                });
            }
            rules.push(RecommendationRule {
                marker: entry.marker,
                status: entry.status,
                bundle: entry.lists.into_bundle(),
            });
        }
        Ok(Self {
            default: file.default.into_bundle(),
            rules,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    catalog: Option<CatalogHeader>,
    default: CategoryLists,
    #[serde(default, rename = "rule")]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogHeader {
    schema: String,
    schema_version: u32,
}

impl CatalogHeader {
    fn check(&self, path: &Path) -> Result<()> {
        if self.schema != CATALOG_SCHEMA {
            return Err(StandardsError::InvalidCatalog {
                path: path.to_path_buf(),
                message: format!("unknown schema {:?}, expected {CATALOG_SCHEMA:?}", self.schema),
            });
        }
        if self.schema_version != CATALOG_SCHEMA_VERSION {
            return Err(StandardsError::InvalidCatalog {
                path: path.to_path_buf(),
                message: format!(
                    "unsupported schema_version {}, expected {CATALOG_SCHEMA_VERSION}",
                    self.schema_version
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    marker: String,
    status: Status,
    #[serde(flatten)]
    lists: CategoryLists,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryLists {
    #[serde(default)]
    diet: Vec<String>,
    #[serde(default)]
    lifestyle: Vec<String>,
    #[serde(default)]
    supplements: Vec<String>,
    #[serde(default)]
    contraindications: Vec<String>,
}

impl CategoryLists {
    fn into_bundle(self) -> RecommendationBundle {
        RecommendationBundle {
            diet: self.diet.into_iter().collect(),
            lifestyle: self.lifestyle.into_iter().collect(),
            supplements: self.supplements.into_iter().collect(),
            contraindications: self.contraindications.into_iter().collect(),
        }
    }
}

/// Load the rule catalog from the default standards directory.
pub fn load_default_recommendations() -> Result<RecommendationCatalog> {
    load_recommendations(&recommendations_path(&standards_root()))
}

pub fn load_recommendations(path: &Path) -> Result<RecommendationCatalog> {
    let text = std::fs::read_to_string(path).map_err(|error| StandardsError::io(path, error))?;
    let catalog = RecommendationCatalog::from_toml_str(&text, path)?;
    tracing::debug!(
        path = %path.display(),
        rule_count = catalog.rules.len(),
        "loaded recommendation catalog"
    );
    Ok(catalog)
}
