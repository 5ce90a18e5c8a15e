//! External tool discovery.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Environment variable overriding the `tesseract` binary.
pub const TESSERACT_ENV_VAR: &str = "LABREPORT_TESSERACT";
/// Environment variable overriding the `pdftoppm` binary.
pub const PDFTOPPM_ENV_VAR: &str = "LABREPORT_PDFTOPPM";

pub const TESSERACT_HINT: &str = "install Tesseract OCR (apt install tesseract-ocr, \
brew install tesseract) or set LABREPORT_TESSERACT to its path";
pub const PDFTOPPM_HINT: &str = "install poppler (apt install poppler-utils, \
brew install poppler) or set LABREPORT_PDFTOPPM to the pdftoppm path";

/// Binaries used for OCR and PDF rasterization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub tesseract: PathBuf,
    pub pdftoppm: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            tesseract: PathBuf::from("tesseract"),
            pdftoppm: PathBuf::from("pdftoppm"),
        }
    }
}

impl ToolPaths {
    /// Tool paths from `LABREPORT_TESSERACT` / `LABREPORT_PDFTOPPM`, falling
    /// back to the bare program names resolved through `PATH`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tesseract: std::env::var_os(TESSERACT_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.tesseract),
            pdftoppm: std::env::var_os(PDFTOPPM_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.pdftoppm),
        }
    }
}

/// Returns true if `program` can be spawned.
///
/// The exit status is ignored; `pdftoppm -v` exits non-zero on some builds.
pub fn command_available(program: impl AsRef<OsStr>) -> bool {
    match Command::new(program)
        .arg("-v")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(_) => true,
        Err(error) => error.kind() != ErrorKind::NotFound,
    }
}
