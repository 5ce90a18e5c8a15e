use std::path::PathBuf;

use lab_extract::Extraction;
use lab_ingest::Transcript;
use lab_model::{AnalysisReport, MarkerDefinition, ReferenceRange};
use lab_report::WrittenOutputs;
use lab_standards::DoctorReport;

#[derive(Debug)]
pub struct AnalyzeResult {
    pub document: PathBuf,
    pub pages: usize,
    pub report: AnalysisReport,
    pub outputs: Option<WrittenOutputs>,
}

#[derive(Debug)]
pub struct ExtractResult {
    pub transcript: Transcript,
    pub extraction: Extraction,
}

#[derive(Debug)]
pub struct MarkerListing {
    pub table: String,
    pub entries: Vec<(MarkerDefinition, Option<ReferenceRange>)>,
}

#[derive(Debug)]
pub struct ToolCheck {
    pub name: &'static str,
    pub program: PathBuf,
    pub available: bool,
    pub hint: &'static str,
}

#[derive(Debug)]
pub struct DoctorResult {
    pub tools: Vec<ToolCheck>,
    pub standards_root: PathBuf,
    pub standards: DoctorReport,
}

impl DoctorResult {
    pub fn is_healthy(&self) -> bool {
        self.standards.is_healthy() && self.tools.iter().all(|tool| tool.available)
    }
}
