//! OCR engines.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{IngestError, Result};
use crate::tools::TESSERACT_HINT;

/// Turns a page image into plain text.
pub trait OcrEngine {
    fn name(&self) -> &str;

    fn recognize(&self, image: &Path) -> Result<String>;
}

/// Tesseract invoked as an external process, text read from stdout.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    program: PathBuf,
    language: String,
}

impl TesseractCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            language: "eng".to_string(),
        }
    }

    /// Tesseract language code, e.g. `eng` or `eng+deu`.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl OcrEngine for TesseractCli {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &Path) -> Result<String> {
        debug!(image = %image.display(), language = %self.language, "running tesseract");
        let output = Command::new(&self.program)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|error| match error.kind() {
                ErrorKind::NotFound => IngestError::ToolMissing {
                    tool: self.program.display().to_string(),
                    hint: TESSERACT_HINT,
                },
                _ => IngestError::io(image, error),
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(IngestError::Ocr {
                path: image.to_path_buf(),
                message: format!("tesseract exited with {}: {}", output.status, stderr.trim()),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
