//! Per-marker regular expressions.

use lab_model::MarkerDefinition;
use regex::{Regex, RegexBuilder};

use crate::error::{ExtractError, Result};

/// Name of the capture group holding the value token.
pub const VALUE_GROUP: &str = "value";

/// Separator between a label and its value: optional horizontal whitespace,
/// an optional parenthesised unit or qualifier, and an optional `:`/`=`.
const SEPARATOR: &str = r"[ \t]*(?:\([^)\n]*\))?[ \t]*[:=]?[ \t]*";

/// Value token: optional comparison symbol, then digit groups joined by
/// `.` or `,`. Tokens like `12.0.1` are captured and rejected at parse time.
const VALUE: &str = r"(?P<value>[<>]?[ \t]*\d+(?:[.,]\d+)*)";

/// Build the search pattern for one marker.
pub fn build_marker_pattern(definition: &MarkerDefinition) -> Result<Regex> {
    let mut labels: Vec<&str> = definition
        .labels
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .collect();
    if labels.is_empty() {
        return Err(ExtractError::NoLabels {
            marker: definition.name.clone(),
        });
    }
    // Longer spellings first so "LDL Cholesterol" is preferred over "LDL".
    labels.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    labels.dedup();

    let alternatives = labels
        .iter()
        .map(|label| label_pattern(label))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!("(?:{alternatives}){SEPARATOR}{VALUE}");

    RegexBuilder::new(&pattern)
        .case_insensitive(!definition.case_sensitive)
        .build()
        .map_err(|source| ExtractError::InvalidPattern {
            marker: definition.name.clone(),
            source,
        })
}

/// Escaped label, anchored on word boundaries where the label starts or
/// ends with a word character.
fn label_pattern(label: &str) -> String {
    let escaped = regex::escape(label);
    let starts_word = label.chars().next().is_some_and(is_word_char);
    let ends_word = label.chars().last().is_some_and(is_word_char);
    format!(
        "{}{}{}",
        if starts_word { r"\b" } else { "" },
        escaped,
        if ends_word { r"\b" } else { "" }
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
