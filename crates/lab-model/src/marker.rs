//! Marker definitions and extracted marker values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison symbol printed in front of a value (`<0.5`, `>90`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparator {
    Less,
    Greater,
}

impl Comparator {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '<' => Some(Comparator::Less),
            '>' => Some(Comparator::Greater),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Comparator::Less => '<',
            Comparator::Greater => '>',
        }
    }
}

/// A marker the extractor knows how to find in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerDefinition {
    /// Canonical marker name (e.g., "Hemoglobin").
    pub name: String,
    /// Printed spellings recognised for this marker. The canonical name is
    /// always one of them.
    pub labels: Vec<String>,
    /// Whether label matching is case-sensitive. Short abbreviations
    /// (MCV, TSH) are matched exactly; spelled-out names are not.
    pub case_sensitive: bool,
    /// Panel the marker belongs to (e.g., "CBC", "Thyroid").
    pub panel: Option<String>,
}

impl MarkerDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            labels: vec![name.clone()],
            name,
            case_sensitive: false,
            panel: None,
        }
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for label in labels {
            let label = label.into();
            if !self.labels.iter().any(|existing| existing == &label) {
                self.labels.push(label);
            }
        }
        self
    }

    #[must_use]
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    #[must_use]
    pub fn with_panel(mut self, panel: impl Into<String>) -> Self {
        self.panel = Some(panel.into());
        self
    }
}

/// One value extracted from a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerValue {
    pub marker: String,
    pub value: f64,
    /// Text captured by the extraction pattern, before parsing.
    pub raw: String,
    pub comparator: Option<Comparator>,
}

impl MarkerValue {
    pub fn new(marker: impl Into<String>, value: f64) -> Self {
        Self {
            marker: marker.into(),
            value,
            raw: value.to_string(),
            comparator: None,
        }
    }

    /// Value as printed on the report, including any comparison symbol.
    pub fn display_value(&self) -> String {
        match self.comparator {
            Some(comparator) => format!("{}{}", comparator.symbol(), self.value),
            None => self.value.to_string(),
        }
    }
}

impl fmt::Display for MarkerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.marker, self.display_value())
    }
}

/// Extracted values keyed by marker name, in extraction order.
///
/// A marker appears at most once; the first value inserted wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerSet {
    values: Vec<MarkerValue>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value unless the marker is already present.
    ///
    /// Returns `false` when an earlier value was kept.
    pub fn insert(&mut self, value: MarkerValue) -> bool {
        if self.contains(&value.marker) {
            return false;
        }
        self.values.push(value);
        true
    }

    pub fn get(&self, marker: &str) -> Option<&MarkerValue> {
        self.values.iter().find(|value| value.marker == marker)
    }

    pub fn value_of(&self, marker: &str) -> Option<f64> {
        self.get(marker).map(|value| value.value)
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.get(marker).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<MarkerValue> for MarkerSet {
    fn from_iter<T: IntoIterator<Item = MarkerValue>>(iter: T) -> Self {
        let mut set = MarkerSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a MarkerSet {
    type Item = &'a MarkerValue;
    type IntoIter = std::slice::Iter<'a, MarkerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
