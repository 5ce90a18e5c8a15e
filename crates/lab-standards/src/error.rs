#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("invalid row {row} in {path}: {message}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error("duplicate marker {marker} in {path}")]
    DuplicateMarker { path: PathBuf, marker: String },

    #[error("unknown range table: {name} (expected basic or comprehensive)")]
    UnknownRangeTable { name: String },

    #[error("invalid recommendation catalog {path}: {message}")]
    InvalidCatalog { path: PathBuf, message: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: &csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub(crate) fn invalid_row(
        path: impl Into<PathBuf>,
        row: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidRow {
            path: path.into(),
            row,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
