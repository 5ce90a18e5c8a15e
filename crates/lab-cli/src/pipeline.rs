//! Analysis pipeline with explicit stages.
//!
//! 0. **Standards**: load marker definitions, the range table, and the rule catalog
//! 1. **Ingest**: turn the document into a transcript (OCR, or a text file)
//! 2. **Extract**: regex marker extraction over the transcript
//! 3. **Analyze**: classify against reference ranges and resolve recommendations
//! 4. **Report**: assemble the serializable report
//! 5. **Output**: write HTML, JSON, and SVG artifacts
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, trace};

use lab_analysis::{classify, resolve_recommendations};
use lab_extract::{Extraction, MarkerExtractor};
use lab_ingest::{
    OcrEngine, PdfRasterizer, Pdftoppm, TesseractCli, ToolPaths, Transcript, read_transcript,
    transcribe,
};
use lab_model::{
    AnalysisReport, AnalysisRow, DISCLAIMER, MarkerDefinition, RangeTable, RecommendationBundle,
};
use lab_report::{OutputOptions, WrittenOutputs, write_report_outputs};
use lab_standards::paths::{markers_path, recommendations_path};
use lab_standards::{
    RangeTableVersion, RecommendationCatalog, load_builtin_range_table, load_marker_definitions,
    load_range_table, load_recommendations,
};

use crate::logging::redact_value;

// ============================================================================
// Stage 0: Standards
// ============================================================================

/// Which reference range table to classify against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSelection {
    Builtin(RangeTableVersion),
    File(PathBuf),
}

impl RangeSelection {
    /// Label recorded in the report.
    pub fn label(&self) -> String {
        match self {
            RangeSelection::Builtin(version) => version.as_str().to_string(),
            RangeSelection::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "custom".to_string()),
        }
    }
}

/// Static tables used by one run.
#[derive(Debug, Clone)]
pub struct Standards {
    pub definitions: Vec<MarkerDefinition>,
    pub ranges: RangeTable,
    pub catalog: RecommendationCatalog,
}

pub fn load_standards(root: &Path, selection: &RangeSelection) -> Result<Standards> {
    let definitions =
        load_marker_definitions(&markers_path(root)).context("load marker definitions")?;
    let ranges = match selection {
        RangeSelection::Builtin(version) => {
            load_builtin_range_table(root, *version).context("load range table")?
        }
        RangeSelection::File(path) => load_range_table(path, &selection.label())
            .with_context(|| format!("load range table {}", path.display()))?,
    };
    let catalog = load_recommendations(&recommendations_path(root))
        .context("load recommendation catalog")?;
    debug!(
        markers = definitions.len(),
        ranges = ranges.len(),
        rules = catalog.rules.len(),
        "standards loaded"
    );
    Ok(Standards {
        definitions,
        ranges,
        catalog,
    })
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// How the document is turned into text.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// The document already is an OCR transcript.
    pub transcript: bool,
    pub language: String,
    pub dpi: u32,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            transcript: false,
            language: "eng".to_string(),
            dpi: lab_ingest::DEFAULT_DPI,
        }
    }
}

/// Ingest with the external tools named by `ToolPaths::from_env`.
pub fn ingest(document: &Path, options: &SourceOptions) -> Result<Transcript> {
    let tools = ToolPaths::from_env();
    let ocr = TesseractCli::new(tools.tesseract).with_language(&options.language);
    let rasterizer = Pdftoppm::new(tools.pdftoppm).with_dpi(options.dpi);
    debug!(
        tesseract = %ocr.program().display(),
        language = ocr.language(),
        pdftoppm = %rasterizer.program().display(),
        dpi = rasterizer.dpi(),
        "ingest tools"
    );
    ingest_with(document, options, &ocr, &rasterizer)
}

pub fn ingest_with(
    document: &Path,
    options: &SourceOptions,
    ocr: &dyn OcrEngine,
    rasterizer: &dyn PdfRasterizer,
) -> Result<Transcript> {
    let transcript = if options.transcript {
        read_transcript(document)
    } else {
        transcribe(document, ocr, rasterizer)
    };
    transcript.map_err(|error| {
        let context = format!("read {}", document.display());
        match error.hint() {
            Some(hint) => anyhow::Error::new(error).context(format!("{context} (hint: {hint})")),
            None => anyhow::Error::new(error).context(context),
        }
    })
}

// ============================================================================
// Stage 2: Extract
// ============================================================================

pub fn extract(transcript: &str, definitions: &[MarkerDefinition]) -> Result<Extraction> {
    let extractor = MarkerExtractor::new(definitions).context("compile marker patterns")?;
    let extraction = extractor.extract(transcript);
    for value in &extraction.markers {
        trace!(
            marker = %value.marker,
            value = redact_value(&value.raw),
            "extracted"
        );
    }
    Ok(extraction)
}

// ============================================================================
// Stage 3: Analyze
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub rows: Vec<AnalysisRow>,
    pub recommendations: RecommendationBundle,
}

impl Analysis {
    pub fn abnormal_count(&self) -> usize {
        self.rows.iter().filter(|row| row.status.is_abnormal()).count()
    }
}

pub fn analyze(extraction: &Extraction, standards: &Standards) -> Analysis {
    let rows = classify(&extraction.markers, &standards.ranges);
    for row in &rows {
        let value = row.display_value();
        trace!(
            marker = %row.marker,
            value = redact_value(&value),
            status = %row.status,
            "classified"
        );
    }
    let recommendations = resolve_recommendations(&rows, &standards.catalog);
    Analysis {
        rows,
        recommendations,
    }
}

// ============================================================================
// Stage 4: Report
// ============================================================================

pub fn build_report(
    transcript: &Transcript,
    range_table: &str,
    extraction: Extraction,
    analysis: Analysis,
) -> AnalysisReport {
    let source = transcript
        .source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| transcript.source.display().to_string());
    let unranged_markers = extraction
        .markers
        .iter()
        .filter(|value| !analysis.rows.iter().any(|row| row.marker == value.marker))
        .map(|value| value.marker.clone())
        .collect();
    AnalysisReport {
        source,
        source_sha256: transcript.sha256.clone(),
        generated_at: Utc::now(),
        range_table: range_table.to_string(),
        rows: analysis.rows,
        warnings: extraction.warnings,
        unranged_markers,
        recommendations: analysis.recommendations,
        disclaimer: DISCLAIMER.to_string(),
    }
}

// ============================================================================
// Stage 5: Output
// ============================================================================

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    /// File name prefix for every artifact.
    pub stem: String,
    pub options: OutputOptions,
}

/// File name prefix derived from the document name.
pub fn report_stem(document: &Path) -> String {
    document
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "labreport".to_string())
}

pub fn output(report: &AnalysisReport, config: &OutputConfig) -> Result<WrittenOutputs> {
    write_report_outputs(&config.output_dir, &config.stem, report, &config.options)
        .with_context(|| format!("write reports to {}", config.output_dir.display()))
}
