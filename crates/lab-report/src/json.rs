use std::path::Path;

use lab_model::AnalysisReport;
use tracing::debug;

use crate::common::write_file;
use crate::error::Result;

/// Pretty-printed JSON for the report.
pub fn render_json(report: &AnalysisReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

pub fn write_json_report(path: &Path, report: &AnalysisReport) -> Result<()> {
    let json = render_json(report)?;
    write_file(path, json.as_bytes())?;
    debug!(path = %path.display(), "wrote json report");
    Ok(())
}
