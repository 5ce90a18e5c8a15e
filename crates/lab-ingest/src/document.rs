//! Supported document types.

use std::fmt;
use std::path::Path;

use crate::error::{IngestError, Result};

/// File extensions accepted as scanned documents.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Png,
    Jpeg,
    Pdf,
}

impl DocumentKind {
    /// Detect the document kind from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "png" => Ok(DocumentKind::Png),
            "jpg" | "jpeg" => Ok(DocumentKind::Jpeg),
            "pdf" => Ok(DocumentKind::Pdf),
            _ => Err(IngestError::UnsupportedFileType {
                path: path.to_path_buf(),
                extension,
                expected: SUPPORTED_EXTENSIONS.join(", "),
            }),
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, DocumentKind::Png | DocumentKind::Jpeg)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Png => "png",
            DocumentKind::Jpeg => "jpeg",
            DocumentKind::Pdf => "pdf",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
