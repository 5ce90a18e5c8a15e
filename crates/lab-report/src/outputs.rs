//! Writes the requested report artifacts for one analysis.

use std::path::{Path, PathBuf};

use lab_model::AnalysisReport;
use tracing::info;

use crate::chart::BarChart;
use crate::error::{ReportError, Result};
use crate::html::write_html_report;
use crate::json::write_json_report;
use crate::svg::write_svg_chart;

/// Which artifacts to write.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub html: bool,
    pub json: bool,
    pub chart: bool,
    /// Source image copied next to the HTML report.
    pub image: Option<PathBuf>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            html: true,
            json: true,
            chart: true,
            image: None,
        }
    }
}

/// Paths of the artifacts actually written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub chart: Option<PathBuf>,
    pub image: Option<PathBuf>,
}

impl WrittenOutputs {
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.html, &self.json, &self.chart, &self.image]
            .into_iter()
            .flatten()
    }
}

/// Write `<stem>.report.html`, `<stem>.report.json`, and `<stem>.chart.svg`
/// into `output_dir`, as selected by `options`.
///
/// The chart is skipped when the report has no rows.
pub fn write_report_outputs(
    output_dir: &Path,
    stem: &str,
    report: &AnalysisReport,
    options: &OutputOptions,
) -> Result<WrittenOutputs> {
    std::fs::create_dir_all(output_dir).map_err(|error| ReportError::io(output_dir, error))?;
    let mut written = WrittenOutputs::default();

    if options.chart && !report.rows.is_empty() {
        let path = output_dir.join(format!("{stem}.chart.svg"));
        write_svg_chart(&path, &BarChart::from_rows(&report.rows))?;
        written.chart = Some(path);
    }

    if options.json {
        let path = output_dir.join(format!("{stem}.report.json"));
        write_json_report(&path, report)?;
        written.json = Some(path);
    }

    if options.html {
        let image_src = match options.image.as_deref() {
            Some(image) => {
                let (src, copied) = copy_image(image, output_dir)?;
                written.image = copied;
                Some(src)
            }
            None => None,
        };
        let path = output_dir.join(format!("{stem}.report.html"));
        write_html_report(&path, report, image_src.as_deref())?;
        written.html = Some(path);
    }

    info!(
        output_dir = %output_dir.display(),
        files = written.paths().count(),
        "wrote report outputs"
    );
    Ok(written)
}

/// Copy `image` into `output_dir` unless it already lives there. Returns the
/// relative `src` for the HTML page and the copied path, if a copy was made.
fn copy_image(image: &Path, output_dir: &Path) -> Result<(String, Option<PathBuf>)> {
    let file_name = image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let target = output_dir.join(&file_name);
    let same_file = match (image.canonicalize(), target.canonicalize()) {
        (Ok(source), Ok(existing)) => source == existing,
        _ => false,
    };
    if same_file {
        return Ok((file_name, None));
    }
    std::fs::copy(image, &target).map_err(|error| ReportError::io(&target, error))?;
    Ok((file_name, Some(target)))
}
