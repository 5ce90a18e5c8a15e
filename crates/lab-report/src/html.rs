//! Standalone HTML report.

use std::io::Write;
use std::path::Path;

use chrono::SecondsFormat;
use lab_model::{AnalysisReport, RecommendationCategory};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use crate::chart::{BarChart, status_color};
use crate::common::{render_error, write_file, write_text_element, write_text_element_with};
use crate::error::Result;
use crate::svg::write_chart;

pub const ALL_NORMAL_MESSAGE: &str = "All tested markers are within normal ranges.";
pub const OUT_OF_RANGE_HEADING: &str = "The following markers are outside the reference range:";
pub const NO_VALUES_MESSAGE: &str = "No marker values were found in the document.";

/// Message shown in place of the results table when a report has no rows.
/// Distinguishes an empty document from markers the range table does not cover.
pub fn no_results_message(report: &AnalysisReport) -> String {
    match report.unranged_markers.len() {
        0 => NO_VALUES_MESSAGE.to_string(),
        1 => format!(
            "1 marker found, none in range table {}.",
            report.range_table
        ),
        count => format!(
            "{count} markers found, none in range table {}.",
            report.range_table
        ),
    }
}

const STYLE: &str = "body { font-family: sans-serif; margin: 2rem auto; max-width: 960px; color: #222222; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #dddddd; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #f2f2f2; }
.status { font-weight: bold; }
.notice { font-style: italic; }
.disclaimer { border-top: 1px solid #dddddd; margin-top: 2rem; padding-top: 1rem; font-size: 0.9rem; }
img.document { max-width: 100%; border: 1px solid #dddddd; }
details { margin: 0.5rem 0; }";

/// Render the report as an HTML page. `image` is the `src` of the source
/// document image, shown at the top when present.
pub fn render_html(report: &AnalysisReport, image: Option<&str>) -> Result<String> {
    let mut xml = Writer::new_with_indent(b"<!DOCTYPE html>\n".to_vec(), b' ', 2);
    write_page(&mut xml, report, image).map_err(render_error("html report"))?;
    let mut bytes = xml.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_html_report(path: &Path, report: &AnalysisReport, image: Option<&str>) -> Result<()> {
    let html = render_html(report, image)?;
    write_file(path, html.as_bytes())?;
    debug!(path = %path.display(), rows = report.rows.len(), "wrote html report");
    Ok(())
}

fn start(name: &str, class: &str) -> BytesStart<'static> {
    let mut element = BytesStart::new(name.to_string());
    element.push_attribute(("class", class));
    element
}

fn end<W: Write>(xml: &mut Writer<W>, name: &str) -> std::result::Result<(), quick_xml::Error> {
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_page<W: Write>(
    xml: &mut Writer<W>,
    report: &AnalysisReport,
    image: Option<&str>,
) -> std::result::Result<(), quick_xml::Error> {
    let mut html = BytesStart::new("html");
    html.push_attribute(("lang", "en"));
    xml.write_event(Event::Start(html))?;

    xml.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "utf-8"));
    xml.write_event(Event::Empty(meta))?;
    write_text_element(xml, "title", &format!("Lab Report Analysis: {}", report.source))?;
    write_text_element(xml, "style", STYLE)?;
    end(xml, "head")?;

    xml.write_event(Event::Start(BytesStart::new("body")))?;
    write_text_element(xml, "h1", "Lab Report Analysis")?;
    let generated = report
        .generated_at
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    let meta_line = format!(
        "Source: {} | Range table: {} | Generated: {}",
        report.source, report.range_table, generated
    );
    write_text_element_with(xml, start("p", "meta"), &meta_line)?;
    write_text_element_with(
        xml,
        start("p", "fingerprint"),
        &format!("SHA-256: {}", report.source_sha256),
    )?;

    if let Some(src) = image {
        xml.write_event(Event::Start(section("document")))?;
        write_text_element(xml, "h2", "Uploaded Document")?;
        let mut img = start("img", "document");
        img.push_attribute(("src", src));
        img.push_attribute(("alt", "Uploaded lab report"));
        xml.write_event(Event::Empty(img))?;
        end(xml, "section")?;
    }

    write_results(xml, report)?;
    write_warnings(xml, report)?;

    if !report.rows.is_empty() {
        xml.write_event(Event::Start(section("chart")))?;
        write_text_element(xml, "h2", "Results Visualization")?;
        write_chart(xml, &BarChart::from_rows(&report.rows))?;
        end(xml, "section")?;

        write_insights(xml, report)?;
    }

    write_recommendations(xml, report)?;

    xml.write_event(Event::Start(section("disclaimer")))?;
    let mut disclaimer = start("p", "disclaimer");
    disclaimer.push_attribute(("role", "note"));
    write_text_element_with(xml, disclaimer, &report.disclaimer)?;
    end(xml, "section")?;

    end(xml, "body")?;
    end(xml, "html")?;
    Ok(())
}

fn section(id: &str) -> BytesStart<'static> {
    let mut element = BytesStart::new("section");
    element.push_attribute(("id", id));
    element
}

fn write_results<W: Write>(
    xml: &mut Writer<W>,
    report: &AnalysisReport,
) -> std::result::Result<(), quick_xml::Error> {
    xml.write_event(Event::Start(section("results")))?;
    write_text_element(xml, "h2", "Analysis Results")?;
    if report.rows.is_empty() {
        write_text_element(xml, "p", &no_results_message(report))?;
        return end(xml, "section");
    }

    xml.write_event(Event::Start(BytesStart::new("table")))?;
    xml.write_event(Event::Start(BytesStart::new("thead")))?;
    xml.write_event(Event::Start(BytesStart::new("tr")))?;
    for heading in ["Marker", "Value", "Unit", "Reference Range", "Status"] {
        write_text_element(xml, "th", heading)?;
    }
    end(xml, "tr")?;
    end(xml, "thead")?;

    xml.write_event(Event::Start(BytesStart::new("tbody")))?;
    for row in &report.rows {
        xml.write_event(Event::Start(BytesStart::new("tr")))?;
        write_text_element(xml, "td", &row.marker)?;
        write_text_element(xml, "td", &row.display_value())?;
        write_text_element(xml, "td", &row.unit)?;
        write_text_element(xml, "td", &row.range)?;
        let mut status = start("td", "status");
        let style = format!("color: {}", status_color(row.status));
        status.push_attribute(("style", style.as_str()));
        write_text_element_with(xml, status, row.status.as_str())?;
        end(xml, "tr")?;
    }
    end(xml, "tbody")?;
    end(xml, "table")?;
    end(xml, "section")
}

fn write_warnings<W: Write>(
    xml: &mut Writer<W>,
    report: &AnalysisReport,
) -> std::result::Result<(), quick_xml::Error> {
    if report.warnings.is_empty() {
        return Ok(());
    }
    xml.write_event(Event::Start(section("warnings")))?;
    write_text_element(xml, "h2", "Unparsed Values")?;
    xml.write_event(Event::Start(BytesStart::new("ul")))?;
    for warning in &report.warnings {
        let text = format!("{}: {:?} ({})", warning.marker, warning.raw, warning.message);
        write_text_element(xml, "li", &text)?;
    }
    end(xml, "ul")?;
    end(xml, "section")
}

fn write_insights<W: Write>(
    xml: &mut Writer<W>,
    report: &AnalysisReport,
) -> std::result::Result<(), quick_xml::Error> {
    xml.write_event(Event::Start(section("insights")))?;
    write_text_element(xml, "h2", "Key Insights")?;
    let abnormal: Vec<_> = report.abnormal_rows().collect();
    if abnormal.is_empty() {
        write_text_element(xml, "p", ALL_NORMAL_MESSAGE)?;
        return end(xml, "section");
    }
    write_text_element(xml, "p", OUT_OF_RANGE_HEADING)?;
    xml.write_event(Event::Start(BytesStart::new("ul")))?;
    for row in abnormal {
        let text = format!("{}: {} ({})", row.marker, row.display_value(), row.status);
        write_text_element(xml, "li", &text)?;
    }
    end(xml, "ul")?;
    end(xml, "section")
}

fn write_recommendations<W: Write>(
    xml: &mut Writer<W>,
    report: &AnalysisReport,
) -> std::result::Result<(), quick_xml::Error> {
    if report.recommendations.is_empty() {
        return Ok(());
    }
    xml.write_event(Event::Start(section("recommendations")))?;
    write_text_element(xml, "h2", "Personalized Recommendations")?;
    for category in RecommendationCategory::ALL {
        let mut details = BytesStart::new("details");
        details.push_attribute(("class", category.as_str()));
        details.push_attribute(("open", "open"));
        xml.write_event(Event::Start(details))?;
        write_text_element(xml, "summary", category.title())?;
        if let Some(notice) = category.notice() {
            write_text_element_with(xml, start("p", "notice"), notice)?;
        }
        xml.write_event(Event::Start(BytesStart::new("ul")))?;
        for item in report.recommendations.category(category) {
            xml.write_event(Event::Start(BytesStart::new("li")))?;
            xml.write_event(Event::Text(BytesText::new(item)))?;
            end(xml, "li")?;
        }
        end(xml, "ul")?;
        end(xml, "details")?;
    }
    end(xml, "section")
}
