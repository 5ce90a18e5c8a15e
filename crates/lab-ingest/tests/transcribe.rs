//! Ingestion tests with in-process OCR and rasterizer fakes.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use lab_ingest::{
    DEFAULT_DPI, DocumentKind, IngestError, OcrEngine, PdfRasterizer, Pdftoppm,
    SUPPORTED_EXTENSIONS, TesseractCli, collect_page_images, command_available, read_transcript, sha256_hex, transcribe,
};
use tempfile::TempDir;

/// Returns `text for <file name>` and records every image it sees.
#[derive(Default)]
struct EchoOcr {
    seen: RefCell<Vec<String>>,
}

impl OcrEngine for EchoOcr {
    fn name(&self) -> &str {
        "echo"
    }

    fn recognize(&self, image: &Path) -> lab_ingest::Result<String> {
        let name = image
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        self.seen.borrow_mut().push(name.clone());
        Ok(format!("text for {name}"))
    }
}

/// Writes `page_count` empty PNG files, deliberately out of order.
struct FakeRasterizer {
    page_count: usize,
}

impl PdfRasterizer for FakeRasterizer {
    fn rasterize(&self, _pdf: &Path, out_dir: &Path) -> lab_ingest::Result<Vec<PathBuf>> {
        for page in (1..=self.page_count).rev() {
            std::fs::write(out_dir.join(format!("page-{page}.png")), b"png").unwrap();
        }
        collect_page_images(out_dir)
    }
}

struct UnreachableRasterizer;

impl PdfRasterizer for UnreachableRasterizer {
    fn rasterize(&self, _pdf: &Path, _out_dir: &Path) -> lab_ingest::Result<Vec<PathBuf>> {
        panic!("images must not be rasterized");
    }
}

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn detects_kind_case_insensitively() {
    assert_eq!(DocumentKind::from_path(Path::new("a.PNG")).unwrap(), DocumentKind::Png);
    assert_eq!(DocumentKind::from_path(Path::new("a.jpg")).unwrap(), DocumentKind::Jpeg);
    assert_eq!(DocumentKind::from_path(Path::new("a.JPEG")).unwrap(), DocumentKind::Jpeg);
    assert_eq!(DocumentKind::from_path(Path::new("a.Pdf")).unwrap(), DocumentKind::Pdf);
}

#[test]
fn rejects_unsupported_extensions() {
    let error = DocumentKind::from_path(Path::new("results.txt")).unwrap_err();
    assert!(matches!(
        error,
        IngestError::UnsupportedFileType { ref extension, .. } if extension == "txt"
    ));
    assert!(DocumentKind::from_path(Path::new("no_extension")).is_err());
    for extension in SUPPORTED_EXTENSIONS {
        assert!(error.to_string().contains(extension));
    }
}

#[test]
fn tool_builders_keep_their_settings() {
    let ocr = TesseractCli::new("/opt/bin/tesseract").with_language("deu");
    assert_eq!(ocr.program(), Path::new("/opt/bin/tesseract"));
    assert_eq!(ocr.language(), "deu");

    let rasterizer = Pdftoppm::default();
    assert_eq!(rasterizer.program(), Path::new("pdftoppm"));
    assert_eq!(rasterizer.dpi(), DEFAULT_DPI);
    assert_eq!(rasterizer.with_dpi(150).dpi(), 150);
}

#[test]
fn image_is_recognized_directly() {
    let dir = TempDir::new().unwrap();
    let image = write_file(&dir, "scan.png", b"fake image");
    let ocr = EchoOcr::default();

    let transcript = transcribe(&image, &ocr, &UnreachableRasterizer).unwrap();

    assert_eq!(transcript.kind, Some(DocumentKind::Png));
    assert_eq!(transcript.text(), "text for scan.png");
    assert_eq!(transcript.sha256, sha256_hex(b"fake image"));
    assert_eq!(ocr.seen.borrow().as_slice(), ["scan.png"]);
}

#[test]
fn pdf_pages_are_joined_in_page_order() {
    let dir = TempDir::new().unwrap();
    let pdf = write_file(&dir, "panel.pdf", b"%PDF-1.7");
    let ocr = EchoOcr::default();

    let transcript = transcribe(&pdf, &ocr, &FakeRasterizer { page_count: 3 }).unwrap();

    assert_eq!(transcript.page_count(), 3);
    assert_eq!(
        transcript.text(),
        "text for page-1.png\ntext for page-2.png\ntext for page-3.png"
    );
}

#[test]
fn unsupported_document_is_rejected_before_ocr() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.docx", b"zip");
    let ocr = EchoOcr::default();

    let error = transcribe(&path, &ocr, &UnreachableRasterizer).unwrap_err();

    assert!(matches!(error, IngestError::UnsupportedFileType { .. }));
    assert!(ocr.seen.borrow().is_empty());
}

#[test]
fn missing_document_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let error = transcribe(
        &dir.path().join("absent.png"),
        &EchoOcr::default(),
        &UnreachableRasterizer,
    )
    .unwrap_err();
    assert!(matches!(error, IngestError::Io { .. }));
}

#[test]
fn missing_tools_report_install_hints() {
    let dir = TempDir::new().unwrap();
    let image = write_file(&dir, "scan.png", b"fake image");
    let pdf = write_file(&dir, "scan.pdf", b"%PDF-1.7");
    let missing = dir.path().join("no-such-binary");

    let ocr_error = TesseractCli::new(&missing).recognize(&image).unwrap_err();
    assert!(matches!(ocr_error, IngestError::ToolMissing { .. }));
    assert!(ocr_error.hint().unwrap().contains("tesseract"));

    let out = TempDir::new().unwrap();
    let pdf_error = Pdftoppm::new(&missing)
        .rasterize(&pdf, out.path())
        .unwrap_err();
    assert!(pdf_error.hint().unwrap().contains("poppler"));
}

#[test]
fn command_available_is_false_for_unknown_program() {
    assert!(!command_available("labreport-definitely-not-installed"));
}

#[test]
fn read_transcript_keeps_text_verbatim() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ocr.txt", b"WBC 11.5\nRBC 4.9\n");

    let transcript = read_transcript(&path).unwrap();

    assert_eq!(transcript.kind, None);
    assert_eq!(transcript.text(), "WBC 11.5\nRBC 4.9\n");
    assert!(!transcript.is_blank());
}

#[test]
fn page_collection_ignores_other_files() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "page-2.png", b"");
    write_file(&dir, "page-1.png", b"");
    write_file(&dir, "page-1.txt", b"");
    write_file(&dir, "cover.png", b"");

    let pages = collect_page_images(dir.path()).unwrap();
    let names: Vec<_> = pages
        .iter()
        .map(|page| page.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["page-1.png", "page-2.png"]);
}
