use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file type {extension:?} for {path} (expected one of: {expected})")]
    UnsupportedFileType {
        path: PathBuf,
        extension: String,
        expected: String,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} was not found on this system")]
    ToolMissing { tool: String, hint: &'static str },

    #[error("PDF conversion failed for {path}: {message}")]
    PdfConversion {
        path: PathBuf,
        message: String,
        hint: &'static str,
    },

    #[error("OCR failed for {path}: {message}")]
    Ocr { path: PathBuf, message: String },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Remediation hint to show next to the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            IngestError::ToolMissing { hint, .. } | IngestError::PdfConversion { hint, .. } => {
                Some(hint)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
