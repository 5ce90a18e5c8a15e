//! Marker extraction from OCR transcripts.

use lab_model::{ExtractionWarning, MarkerDefinition, MarkerSet, MarkerValue};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::pattern::{VALUE_GROUP, build_marker_pattern};
use crate::value::parse_marker_value;

/// Result of running every marker pattern over one transcript.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub markers: MarkerSet,
    /// Markers whose captured text was not a number. They are absent from
    /// `markers`.
    pub warnings: Vec<ExtractionWarning>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[derive(Debug, Clone)]
struct CompiledMarker {
    name: String,
    pattern: Regex,
}

/// Compiled pattern set for a fixed list of markers.
#[derive(Debug, Clone)]
pub struct MarkerExtractor {
    markers: Vec<CompiledMarker>,
}

impl MarkerExtractor {
    /// Compile one pattern per definition, in definition order.
    pub fn new(definitions: &[MarkerDefinition]) -> Result<Self> {
        let markers = definitions
            .iter()
            .map(|definition| {
                Ok(CompiledMarker {
                    name: definition.name.clone(),
                    pattern: build_marker_pattern(definition)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { markers })
    }

    /// Search the transcript once per marker. The first occurrence of a
    /// label wins; later occurrences are ignored.
    pub fn extract(&self, transcript: &str) -> Extraction {
        let mut extraction = Extraction::default();
        for marker in &self.markers {
            let Some(captures) = marker.pattern.captures(transcript) else {
                continue;
            };
            let Some(raw) = captures.name(VALUE_GROUP).map(|m| m.as_str().trim()) else {
                continue;
            };
            match parse_marker_value(raw) {
                Ok((comparator, value)) => {
                    debug!(marker = %marker.name, "marker matched");
                    extraction.markers.insert(MarkerValue {
                        marker: marker.name.clone(),
                        value,
                        raw: raw.to_string(),
                        comparator,
                    });
                }
                Err(error) => {
                    warn!(marker = %marker.name, "marker value is not a number");
                    extraction.warnings.push(ExtractionWarning {
                        marker: marker.name.clone(),
                        raw: raw.to_string(),
                        message: format!("could not parse {raw:?} as a number: {error}"),
                    });
                }
            }
        }
        extraction
    }
}

/// Compile the definitions and extract in one call.
pub fn extract_markers(transcript: &str, definitions: &[MarkerDefinition]) -> Result<Extraction> {
    Ok(MarkerExtractor::new(definitions)?.extract(transcript))
}
