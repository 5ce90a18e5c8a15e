//! CLI argument definitions for labreport.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use lab_standards::RangeTableVersion;

#[derive(Parser)]
#[command(
    name = "labreport",
    version,
    about = "Lab report analyzer - extract, classify, and explain lab results",
    long_about = "Extract lab marker values from a scanned report (PNG, JPEG, or PDF),\n\
                  classify them against reference ranges, and print recommendations.\n\n\
                  Requires tesseract for OCR and pdftoppm (poppler) for PDF input."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow lab values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Standards directory (overrides LABREPORT_STANDARDS_DIR).
    #[arg(long = "standards-dir", value_name = "DIR", global = true)]
    pub standards_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full analysis on a scanned lab report.
    Analyze(AnalyzeArgs),

    /// Run OCR and marker extraction only.
    Extract(ExtractArgs),

    /// List known markers with their reference ranges.
    Markers(MarkersArgs),

    /// Check external tools and standards files.
    Doctor(DoctorArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Lab report to analyze (png, jpg, jpeg, or pdf).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Write HTML, JSON, and SVG reports into this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub ranges: RangeArgs,

    /// Skip the HTML report.
    #[arg(long = "no-html")]
    pub no_html: bool,

    /// Skip the JSON report.
    #[arg(long = "no-json")]
    pub no_json: bool,

    /// Skip the SVG chart.
    #[arg(long = "no-chart")]
    pub no_chart: bool,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Lab report to read (png, jpg, jpeg, or pdf).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args)]
pub struct MarkersArgs {
    #[command(flatten)]
    pub ranges: RangeArgs,
}

#[derive(Args)]
pub struct DoctorArgs {
    /// Print the standards check as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Treat DOCUMENT as an OCR transcript (plain text) and skip OCR.
    #[arg(long = "transcript")]
    pub transcript: bool,

    /// Tesseract language code.
    #[arg(long = "lang", default_value = "eng")]
    pub lang: String,

    /// Resolution used when rasterizing PDF pages.
    #[arg(long = "dpi", default_value_t = lab_ingest::DEFAULT_DPI)]
    pub dpi: u32,
}

#[derive(Args, Clone)]
pub struct RangeArgs {
    /// Built-in reference range table.
    #[arg(long = "range-table", value_enum, default_value = "basic")]
    pub range_table: RangeTableArg,

    /// Custom reference range CSV (Marker, Low, High, Unit); overrides --range-table.
    #[arg(long = "range-file", value_name = "CSV")]
    pub range_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RangeTableArg {
    Basic,
    Comprehensive,
}

impl From<RangeTableArg> for RangeTableVersion {
    fn from(value: RangeTableArg) -> Self {
        match value {
            RangeTableArg::Basic => RangeTableVersion::Basic,
            RangeTableArg::Comprehensive => RangeTableVersion::Comprehensive,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
