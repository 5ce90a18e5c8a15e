//! Integration tests for the pipeline module.

use std::path::{Path, PathBuf};

use lab_cli::pipeline::{
    OutputConfig, RangeSelection, SourceOptions, Standards, analyze, build_report, extract,
    ingest_with, load_standards, output, report_stem,
};
use lab_ingest::{OcrEngine, PdfRasterizer, Transcript};
use lab_model::{DISCLAIMER, Status};
use lab_report::{NO_VALUES_MESSAGE, OutputOptions, no_results_message};
use lab_standards::{RangeTableVersion, standards_root};
use tempfile::TempDir;

struct CannedOcr(&'static str);

impl OcrEngine for CannedOcr {
    fn name(&self) -> &str {
        "canned"
    }

    fn recognize(&self, _image: &Path) -> lab_ingest::Result<String> {
        Ok(self.0.to_string())
    }
}

struct NoPdf;

impl PdfRasterizer for NoPdf {
    fn rasterize(&self, _pdf: &Path, _out_dir: &Path) -> lab_ingest::Result<Vec<PathBuf>> {
        panic!("no pdf expected");
    }
}

fn standards(version: RangeTableVersion) -> Standards {
    load_standards(&standards_root(), &RangeSelection::Builtin(version)).unwrap()
}

fn transcript_of(text: &str) -> Transcript {
    Transcript {
        source: PathBuf::from("panel.png"),
        kind: None,
        sha256: "00".repeat(32),
        pages: vec![text.to_string()],
    }
}

#[test]
fn basic_table_example_classifies_high_and_low() {
    let standards = standards(RangeTableVersion::Basic);
    let extraction = extract("WBC: 11.5 Hemoglobin: 12.0", &standards.definitions).unwrap();
    let analysis = analyze(&extraction, &standards);

    let rows: Vec<_> = analysis
        .rows
        .iter()
        .map(|row| (row.marker.as_str(), row.value, row.status))
        .collect();
    assert_eq!(
        rows,
        [("WBC", 11.5, Status::High), ("Hemoglobin", 12.0, Status::Low)]
    );
    assert_eq!(analysis.abnormal_count(), 2);

    // Neither WBC HIGH nor Hemoglobin LOW has a rule, so both resolve to the default bundle.
    assert_eq!(analysis.recommendations, standards.catalog.default);
}

#[test]
fn markers_outside_the_table_are_dropped() {
    let standards = standards(RangeTableVersion::Basic);
    let extraction = extract("TSH 6.1\nWBC 5.0", &standards.definitions).unwrap();
    assert_eq!(extraction.markers.len(), 2);

    let analysis = analyze(&extraction, &standards);
    assert_eq!(analysis.rows.len(), 1);
    assert_eq!(analysis.rows[0].marker, "WBC");
    assert!(analysis.recommendations.is_empty());
}

#[test]
fn comprehensive_table_uses_thyroid_rules() {
    let standards = standards(RangeTableVersion::Comprehensive);
    let extraction = extract("TSH 6.1 uIU/mL\nFree T4 1.2", &standards.definitions).unwrap();
    let analysis = analyze(&extraction, &standards);

    let tsh = analysis.rows.iter().find(|row| row.marker == "TSH").unwrap();
    assert_eq!(tsh.status, Status::High);
    assert!(
        analysis
            .recommendations
            .contraindications
            .contains("Avoid iodine supplements")
    );
}

#[test]
fn empty_transcript_is_not_an_error() {
    let standards = standards(RangeTableVersion::Basic);
    let extraction = extract("", &standards.definitions).unwrap();
    assert!(extraction.is_empty());

    let analysis = analyze(&extraction, &standards);
    let report = build_report(&transcript_of(""), "basic", extraction, analysis);
    assert!(report.rows.is_empty());
    assert!(report.recommendations.is_empty());
    assert!(report.unranged_markers.is_empty());
    assert_eq!(no_results_message(&report), NO_VALUES_MESSAGE);
    assert_eq!(report.disclaimer, DISCLAIMER);
}

#[test]
fn markers_without_ranges_are_reported_by_name() {
    let standards = standards(RangeTableVersion::Basic);
    let extraction = extract("TSH: 9.1", &standards.definitions).unwrap();
    assert_eq!(extraction.markers.len(), 1);

    let analysis = analyze(&extraction, &standards);
    let report = build_report(&transcript_of("TSH: 9.1"), "basic", extraction, analysis);
    assert!(report.rows.is_empty());
    assert_eq!(report.unranged_markers, ["TSH"]);
    assert_eq!(
        no_results_message(&report),
        "1 marker found, none in range table basic."
    );
}

#[test]
fn transcript_mode_reads_text_without_ocr() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ocr.txt");
    std::fs::write(&path, "WBC 4.2").unwrap();
    let options = SourceOptions {
        transcript: true,
        ..SourceOptions::default()
    };

    let transcript = ingest_with(&path, &options, &CannedOcr("unused"), &NoPdf).unwrap();
    assert_eq!(transcript.text(), "WBC 4.2");
}

#[test]
fn image_goes_through_ocr_engine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scan.jpg");
    std::fs::write(&path, b"jpeg").unwrap();

    let transcript = ingest_with(
        &path,
        &SourceOptions::default(),
        &CannedOcr("Platelets 151"),
        &NoPdf,
    )
    .unwrap();
    assert_eq!(transcript.text(), "Platelets 151");
}

#[test]
fn unsupported_document_reports_its_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.docx");
    std::fs::write(&path, b"zip").unwrap();

    let error =
        ingest_with(&path, &SourceOptions::default(), &CannedOcr(""), &NoPdf).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("notes.docx"));
    assert!(message.contains("unsupported file type"));
}

#[test]
fn custom_range_file_is_labelled_by_file_stem() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clinic.csv");
    std::fs::write(&path, "\"Marker\",\"Low\",\"High\",\"Unit\"\n\"WBC\",\"4.0\",\"10.0\",\"K/uL\"\n")
        .unwrap();
    let selection = RangeSelection::File(path);
    assert_eq!(selection.label(), "clinic");

    let standards = load_standards(&standards_root(), &selection).unwrap();
    let extraction = extract("WBC 10.5", &standards.definitions).unwrap();
    let analysis = analyze(&extraction, &standards);
    assert_eq!(analysis.rows[0].status, Status::High);
    assert_eq!(analysis.rows[0].unit, "K/uL");
}

#[test]
fn output_stage_writes_reports() {
    let standards = standards(RangeTableVersion::Basic);
    let extraction = extract("WBC: 11.5", &standards.definitions).unwrap();
    let analysis = analyze(&extraction, &standards);
    let report = build_report(&transcript_of("WBC: 11.5"), "basic", extraction, analysis);
    assert_eq!(report.source, "panel.png");

    let dir = TempDir::new().unwrap();
    let config = OutputConfig {
        output_dir: dir.path().to_path_buf(),
        stem: report_stem(Path::new("/scans/panel.png")),
        options: OutputOptions::default(),
    };
    let written = output(&report, &config).unwrap();
    assert_eq!(written.html, Some(dir.path().join("panel.report.html")));
    let json = std::fs::read_to_string(dir.path().join("panel.report.json")).unwrap();
    assert!(json.contains("\"status\": \"HIGH\""));
}

#[test]
fn report_stem_falls_back_for_bare_paths() {
    assert_eq!(report_stem(Path::new("results.pdf")), "results");
    assert_eq!(report_stem(Path::new("/")), "labreport");
}
