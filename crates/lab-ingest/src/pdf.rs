//! PDF rasterization.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{IngestError, Result};
use crate::tools::PDFTOPPM_HINT;

/// Default rendering resolution for PDF pages.
pub const DEFAULT_DPI: u32 = 300;

/// Renders each page of a PDF into an image file.
pub trait PdfRasterizer {
    /// Render `pdf` into `out_dir`, returning page images in page order.
    fn rasterize(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>>;
}

/// `pdftoppm` from poppler-utils.
#[derive(Debug, Clone)]
pub struct Pdftoppm {
    program: PathBuf,
    dpi: u32,
}

impl Pdftoppm {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dpi: DEFAULT_DPI,
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }
}

impl Default for Pdftoppm {
    fn default() -> Self {
        Self::new("pdftoppm")
    }
}

impl PdfRasterizer for Pdftoppm {
    fn rasterize(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
        debug!(pdf = %pdf.display(), dpi = self.dpi, "running pdftoppm");
        let output = Command::new(&self.program)
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg(pdf)
            .arg(out_dir.join("page"))
            .output()
            .map_err(|error| match error.kind() {
                ErrorKind::NotFound => IngestError::ToolMissing {
                    tool: self.program.display().to_string(),
                    hint: PDFTOPPM_HINT,
                },
                _ => IngestError::io(pdf, error),
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(IngestError::PdfConversion {
                path: pdf.to_path_buf(),
                message: format!("pdftoppm exited with {}: {}", output.status, stderr.trim()),
                hint: PDFTOPPM_HINT,
            });
        }
        let pages = collect_page_images(out_dir)?;
        if pages.is_empty() {
            return Err(IngestError::PdfConversion {
                path: pdf.to_path_buf(),
                message: "no pages were rendered".to_string(),
                hint: PDFTOPPM_HINT,
            });
        }
        Ok(pages)
    }
}

/// PNG files in `dir` whose name starts with `page`, sorted by name.
///
/// pdftoppm zero-pads page numbers to a common width, so name order is page order.
pub fn collect_page_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|error| IngestError::io(dir, error))?;
    let mut pages = Vec::new();
    for entry in entries {
        let path = entry.map_err(|error| IngestError::io(dir, error))?.path();
        let is_page = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("page") && name.ends_with(".png"));
        if is_page {
            pages.push(path);
        }
    }
    pages.sort();
    Ok(pages)
}
