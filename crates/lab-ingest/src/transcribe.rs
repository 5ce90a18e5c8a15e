//! Document to transcript.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::document::DocumentKind;
use crate::error::{IngestError, Result};
use crate::ocr::OcrEngine;
use crate::pdf::PdfRasterizer;

/// OCR output for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub source: PathBuf,
    /// `None` when the transcript was read from a text file.
    pub kind: Option<DocumentKind>,
    /// SHA-256 of the source bytes, hex encoded.
    pub sha256: String,
    pub pages: Vec<String>,
}

impl Transcript {
    /// All pages joined with a newline.
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|page| page.trim().is_empty())
    }
}

/// Hex-encoded SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Transcribe an image or PDF document.
///
/// Images are recognized directly. PDFs are rasterized into a temporary
/// directory first; every page is recognized and the texts concatenated.
pub fn transcribe(
    path: &Path,
    ocr: &dyn OcrEngine,
    rasterizer: &dyn PdfRasterizer,
) -> Result<Transcript> {
    let kind = DocumentKind::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|error| IngestError::io(path, error))?;
    let sha256 = sha256_hex(&bytes);

    let pages = if kind.is_image() {
        vec![ocr.recognize(path)?]
    } else {
        let workdir = tempfile::Builder::new()
            .prefix("labreport-pages-")
            .tempdir()
            .map_err(|error| IngestError::io(std::env::temp_dir(), error))?;
        let images = rasterizer.rasterize(path, workdir.path())?;
        debug!(pages = images.len(), "rasterized pdf");
        let mut pages = Vec::with_capacity(images.len());
        for image in &images {
            pages.push(ocr.recognize(image)?);
        }
        pages
    };

    let transcript = Transcript {
        source: path.to_path_buf(),
        kind: Some(kind),
        sha256,
        pages,
    };
    info!(
        engine = ocr.name(),
        kind = %kind,
        pages = transcript.page_count(),
        chars = transcript.pages.iter().map(String::len).sum::<usize>(),
        "transcribed document"
    );
    Ok(transcript)
}

/// Load a previously produced transcript from a UTF-8 text file.
pub fn read_transcript(path: &Path) -> Result<Transcript> {
    let bytes = std::fs::read(path).map_err(|error| IngestError::io(path, error))?;
    let sha256 = sha256_hex(&bytes);
    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok(Transcript {
        source: path.to_path_buf(),
        kind: None,
        sha256,
        pages: vec![text],
    })
}
