pub mod analysis;
pub mod error;
pub mod marker;
pub mod range;
pub mod recommendation;
pub mod report;

pub use analysis::{AnalysisRow, Status};
pub use error::{LabError, Result};
pub use marker::{Comparator, MarkerDefinition, MarkerSet, MarkerValue};
pub use range::{RangeTable, ReferenceRange, format_bound};
pub use recommendation::{RecommendationBundle, RecommendationCategory};
pub use report::{AnalysisReport, DISCLAIMER, ExtractionWarning};
