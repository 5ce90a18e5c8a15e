//! Report output for lab report analyses.
//!
//! - **Bar chart**: one bar per classified marker, colored by status, rendered
//!   as SVG or as terminal block bars
//! - **HTML**: standalone page with results, chart, insights, and
//!   recommendation panels
//! - **JSON**: the serialized [`lab_model::AnalysisReport`]

mod common;

pub mod chart;
pub mod error;
pub mod html;
pub mod json;
pub mod outputs;
pub mod svg;

pub use chart::{Bar, BarChart, status_color, text_bar};
pub use error::{ReportError, Result};
pub use html::{
    ALL_NORMAL_MESSAGE, NO_VALUES_MESSAGE, OUT_OF_RANGE_HEADING, no_results_message, render_html,
    write_html_report,
};
pub use json::{render_json, write_json_report};
pub use outputs::{OutputOptions, WrittenOutputs, write_report_outputs};
pub use svg::{chart_dimensions, render_svg, write_svg_chart};
