//! Document ingestion for lab reports.
//!
//! Detects the document type, rasterizes PDFs with `pdftoppm`, and runs OCR
//! with Tesseract. Both tools sit behind traits so callers and tests can
//! substitute their own engines.

pub mod document;
pub mod error;
pub mod ocr;
pub mod pdf;
pub mod tools;
pub mod transcribe;

pub use document::{DocumentKind, SUPPORTED_EXTENSIONS};
pub use error::{IngestError, Result};
pub use ocr::{OcrEngine, TesseractCli};
pub use pdf::{DEFAULT_DPI, PdfRasterizer, Pdftoppm, collect_page_images};
pub use tools::{
    PDFTOPPM_ENV_VAR, PDFTOPPM_HINT, TESSERACT_ENV_VAR, TESSERACT_HINT, ToolPaths,
    command_available,
};
pub use transcribe::{Transcript, read_transcript, sha256_hex, transcribe};
