use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("marker {marker} has no labels")]
    NoLabels { marker: String },
    #[error("invalid pattern for marker {marker}: {source}")]
    InvalidPattern {
        marker: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
