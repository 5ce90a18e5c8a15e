//! Recommendation bundles.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Diet,
    Lifestyle,
    Supplements,
    Contraindications,
}

impl RecommendationCategory {
    pub const ALL: [RecommendationCategory; 4] = [
        RecommendationCategory::Diet,
        RecommendationCategory::Lifestyle,
        RecommendationCategory::Supplements,
        RecommendationCategory::Contraindications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCategory::Diet => "diet",
            RecommendationCategory::Lifestyle => "lifestyle",
            RecommendationCategory::Supplements => "supplements",
            RecommendationCategory::Contraindications => "contraindications",
        }
    }

    /// Panel heading shown in reports.
    pub fn title(&self) -> &'static str {
        match self {
            RecommendationCategory::Diet => "Dietary Recommendations",
            RecommendationCategory::Lifestyle => "Lifestyle Recommendations",
            RecommendationCategory::Supplements => "Supplement Recommendations",
            RecommendationCategory::Contraindications => "Important Contraindications",
        }
    }

    /// Notice printed at the top of the panel, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            RecommendationCategory::Supplements => Some(
                "Always consult with your healthcare provider before starting any supplements.",
            ),
            RecommendationCategory::Contraindications => {
                Some("These are important safety considerations based on your results:")
            }
            _ => None,
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four recommendation lists. Entries are deduplicated and kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    #[serde(default)]
    pub diet: BTreeSet<String>,
    #[serde(default)]
    pub lifestyle: BTreeSet<String>,
    #[serde(default)]
    pub supplements: BTreeSet<String>,
    #[serde(default)]
    pub contraindications: BTreeSet<String>,
}

impl RecommendationBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, category: RecommendationCategory) -> &BTreeSet<String> {
        match category {
            RecommendationCategory::Diet => &self.diet,
            RecommendationCategory::Lifestyle => &self.lifestyle,
            RecommendationCategory::Supplements => &self.supplements,
            RecommendationCategory::Contraindications => &self.contraindications,
        }
    }

    pub fn category_mut(&mut self, category: RecommendationCategory) -> &mut BTreeSet<String> {
        match category {
            RecommendationCategory::Diet => &mut self.diet,
            RecommendationCategory::Lifestyle => &mut self.lifestyle,
            RecommendationCategory::Supplements => &mut self.supplements,
            RecommendationCategory::Contraindications => &mut self.contraindications,
        }
    }

    /// Add every entry of `other` to this bundle.
    pub fn merge(&mut self, other: &RecommendationBundle) {
        for category in RecommendationCategory::ALL {
            self.category_mut(category)
                .extend(other.category(category).iter().cloned());
        }
    }

    pub fn len(&self) -> usize {
        RecommendationCategory::ALL
            .iter()
            .map(|category| self.category(*category).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
