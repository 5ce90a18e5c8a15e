use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, warn};

use lab_cli::pipeline::{
    OutputConfig, RangeSelection, SourceOptions, analyze, build_report, extract, ingest,
    load_standards, output, report_stem,
};
use lab_ingest::{DocumentKind, PDFTOPPM_HINT, TESSERACT_HINT, ToolPaths, command_available};
use lab_report::OutputOptions;
use lab_standards::paths::markers_path;
use lab_standards::{DoctorReport, load_marker_definitions, standards_root};

use crate::cli::{AnalyzeArgs, ExtractArgs, MarkersArgs, RangeArgs, SourceArgs};
use crate::types::{AnalyzeResult, DoctorResult, ExtractResult, MarkerListing, ToolCheck};

/// `--standards-dir`, else `LABREPORT_STANDARDS_DIR`, else the bundled directory.
pub fn resolve_standards_root(cli_override: Option<&Path>) -> PathBuf {
    cli_override
        .map(Path::to_path_buf)
        .unwrap_or_else(standards_root)
}

pub fn run_analyze(args: &AnalyzeArgs, root: &Path) -> Result<AnalyzeResult> {
    let document = &args.document;
    let analyze_span = info_span!("analyze", document = %document.display());
    let _analyze_guard = analyze_span.enter();

    // =========================================================================
    // Stage 0: Standards
    // =========================================================================
    let selection = range_selection(&args.ranges);
    let standards = load_standards(root, &selection)?;

    // =========================================================================
    // Stage 1: Ingest
    // =========================================================================
    let source = source_options(&args.source);
    let ingest_start = Instant::now();
    let transcript = {
        let spinner = ocr_spinner(document, &source);
        let result = info_span!("ingest").in_scope(|| ingest(document, &source));
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        result?
    };
    info!(
        pages = transcript.page_count(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    // =========================================================================
    // Stage 2: Extract
    // =========================================================================
    let extract_start = Instant::now();
    let text = transcript.text();
    let extraction = info_span!("extract").in_scope(|| extract(&text, &standards.definitions))?;
    info!(
        markers = extraction.markers.len(),
        warnings = extraction.warnings.len(),
        duration_ms = extract_start.elapsed().as_millis(),
        "extract complete"
    );
    if extraction.is_empty() {
        warn!("no marker values found in the document");
    }

    // =========================================================================
    // Stage 3: Analyze
    // =========================================================================
    let analyze_start = Instant::now();
    let analysis = info_span!("classify").in_scope(|| analyze(&extraction, &standards));
    info!(
        rows = analysis.rows.len(),
        abnormal = analysis.abnormal_count(),
        recommendations = analysis.recommendations.len(),
        duration_ms = analyze_start.elapsed().as_millis(),
        "analysis complete"
    );

    // =========================================================================
    // Stage 4-5: Report and output
    // =========================================================================
    let pages = transcript.page_count();
    let report = build_report(&transcript, &standards.ranges.name, extraction, analysis);
    let outputs = match &args.output_dir {
        Some(output_dir) => {
            let output_start = Instant::now();
            let config = OutputConfig {
                output_dir: output_dir.clone(),
                stem: report_stem(document),
                options: OutputOptions {
                    html: !args.no_html,
                    json: !args.no_json,
                    chart: !args.no_chart,
                    image: source_image(document, &source),
                },
            };
            let written = info_span!("output").in_scope(|| output(&report, &config))?;
            info!(
                duration_ms = output_start.elapsed().as_millis(),
                "output complete"
            );
            Some(written)
        }
        None => None,
    };

    Ok(AnalyzeResult {
        document: document.clone(),
        pages,
        report,
        outputs,
    })
}

pub fn run_extract(args: &ExtractArgs, root: &Path) -> Result<ExtractResult> {
    let document = &args.document;
    let _extract_guard = info_span!("extract", document = %document.display()).entered();
    let definitions =
        load_marker_definitions(&markers_path(root)).context("load marker definitions")?;
    let source = source_options(&args.source);
    let transcript = {
        let spinner = ocr_spinner(document, &source);
        let result = ingest(document, &source);
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        result?
    };
    let extraction = extract(&transcript.text(), &definitions)?;
    Ok(ExtractResult {
        transcript,
        extraction,
    })
}

pub fn run_markers(args: &MarkersArgs, root: &Path) -> Result<MarkerListing> {
    let selection = range_selection(&args.ranges);
    let standards = load_standards(root, &selection)?;
    let entries = standards
        .definitions
        .into_iter()
        .map(|definition| {
            let range = standards.ranges.get(&definition.name).cloned();
            (definition, range)
        })
        .collect();
    Ok(MarkerListing {
        table: standards.ranges.name,
        entries,
    })
}

pub fn run_doctor(root: &Path) -> DoctorResult {
    let tools = ToolPaths::from_env();
    let checks = vec![
        ToolCheck {
            name: "tesseract",
            available: command_available(&tools.tesseract),
            program: tools.tesseract,
            hint: TESSERACT_HINT,
        },
        ToolCheck {
            name: "pdftoppm",
            available: command_available(&tools.pdftoppm),
            program: tools.pdftoppm,
            hint: PDFTOPPM_HINT,
        },
    ];
    DoctorResult {
        tools: checks,
        standards_root: root.to_path_buf(),
        standards: DoctorReport::inspect(root),
    }
}

fn range_selection(args: &RangeArgs) -> RangeSelection {
    match &args.range_file {
        Some(path) => RangeSelection::File(path.clone()),
        None => RangeSelection::Builtin(args.range_table.into()),
    }
}

fn source_options(args: &SourceArgs) -> SourceOptions {
    SourceOptions {
        transcript: args.transcript,
        language: args.lang.clone(),
        dpi: args.dpi,
    }
}

/// Image inputs are embedded in the HTML report; PDFs and transcripts are not.
fn source_image(document: &Path, source: &SourceOptions) -> Option<PathBuf> {
    if source.transcript {
        return None;
    }
    match DocumentKind::from_path(document) {
        Ok(kind) if kind.is_image() => Some(document.to_path_buf()),
        _ => None,
    }
}

fn ocr_spinner(document: &Path, source: &SourceOptions) -> Option<ProgressBar> {
    if source.transcript || !io::stderr().is_terminal() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    spinner.set_style(style);
    let name = document
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    spinner.set_message(format!("Extracting text from {name}..."));
    spinner.enable_steady_tick(Duration::from_millis(80));
    Some(spinner)
}
