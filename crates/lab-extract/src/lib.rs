//! Lab marker extraction.
//!
//! Each marker in a fixed list gets one regular expression built from its
//! printed labels. Extraction runs every pattern independently over the
//! transcript; there is no cross-field checking and the first match wins.

mod error;
mod extractor;
mod pattern;
mod value;

pub use error::{ExtractError, Result};
pub use extractor::{Extraction, MarkerExtractor, extract_markers};
pub use pattern::build_marker_pattern;
pub use value::parse_marker_value;
