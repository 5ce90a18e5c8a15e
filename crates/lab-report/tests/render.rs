//! Chart and report rendering tests.

use chrono::{TimeZone, Utc};
use lab_model::{
    AnalysisReport, AnalysisRow, Comparator, DISCLAIMER, ExtractionWarning, RecommendationBundle,
    Status,
};
use lab_report::{
    ALL_NORMAL_MESSAGE, BarChart, NO_VALUES_MESSAGE, OUT_OF_RANGE_HEADING, no_results_message,
    render_html, render_json, render_svg, status_color, text_bar,
};

fn row(marker: &str, value: f64, range: &str, status: Status) -> AnalysisRow {
    AnalysisRow {
        marker: marker.to_string(),
        value,
        unit: "x10E3/uL".to_string(),
        range: range.to_string(),
        status,
        comparator: None,
    }
}

fn report(rows: Vec<AnalysisRow>, recommendations: RecommendationBundle) -> AnalysisReport {
    AnalysisReport {
        source: "panel.png".to_string(),
        source_sha256: "ab".repeat(32),
        generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        range_table: "basic".to_string(),
        rows,
        warnings: vec![],
        unranged_markers: vec![],
        recommendations,
        disclaimer: DISCLAIMER.to_string(),
    }
}

fn abnormal_rows() -> Vec<AnalysisRow> {
    vec![
        row("WBC", 11.5, "3.4-10.8", Status::High),
        row("Hemoglobin", 12.0, "13.0-17.7", Status::Low),
        row("Platelets", 240.0, "150.0-450.0", Status::Normal),
    ]
}

#[test]
fn colors_follow_status() {
    assert_eq!(status_color(Status::Normal), "#2e7d32");
    assert_eq!(status_color(Status::Low), "#f9a825");
    assert_eq!(status_color(Status::High), "#c62828");
}

#[test]
fn chart_keeps_row_order_and_printed_values() {
    let mut rows = abnormal_rows();
    rows[0].comparator = Some(Comparator::Greater);
    let chart = BarChart::from_rows(&rows);
    let markers: Vec<_> = chart.bars.iter().map(|bar| bar.marker.as_str()).collect();
    assert_eq!(markers, ["WBC", "Hemoglobin", "Platelets"]);
    assert_eq!(chart.bars[0].label, ">11.5");
    assert_eq!(chart.max_value(), 240.0);
}

#[test]
fn svg_has_one_colored_bar_per_row() {
    let svg = render_svg(&BarChart::from_rows(&abnormal_rows())).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<rect").count(), 3);
    assert!(svg.contains(r##"fill="#c62828""##));
    assert!(svg.contains(r##"fill="#f9a825""##));
    assert!(svg.contains(r##"fill="#2e7d32""##));
    // The tallest bar spans the full plot height.
    assert!(svg.contains(r#"height="240.0""#));
    assert!(svg.contains(r#"data-marker="Hemoglobin""#));
    assert!(svg.contains("Lab Results Overview"));
}

#[test]
fn empty_chart_still_renders() {
    let svg = render_svg(&BarChart::from_rows(&[])).unwrap();
    assert!(svg.contains("</svg>"));
    assert!(!svg.contains("<rect"));
}

#[test]
fn text_bar_scales_against_max() {
    assert_eq!(text_bar(5.0, 10.0, 10).chars().count(), 5);
    assert_eq!(text_bar(10.0, 10.0, 10).chars().count(), 10);
    assert_eq!(text_bar(0.01, 100.0, 10).chars().count(), 1);
    assert_eq!(text_bar(0.0, 10.0, 10), "");
    assert_eq!(text_bar(3.0, 0.0, 10), "");
}

#[test]
fn html_lists_out_of_range_markers() {
    let mut bundle = RecommendationBundle::new();
    bundle.diet.insert("Stay well hydrated".to_string());
    bundle
        .supplements
        .insert("Consult healthcare provider for personalized recommendations".to_string());
    let html = render_html(&report(abnormal_rows(), bundle), Some("panel.png")).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
    assert!(html.contains(r#"<img class="document" src="panel.png""#));
    assert!(html.contains("Analysis Results"));
    assert!(html.contains(OUT_OF_RANGE_HEADING));
    assert!(html.contains("<li>WBC: 11.5 (HIGH)</li>"));
    assert!(html.contains("<li>Hemoglobin: 12 (LOW)</li>"));
    assert!(!html.contains("Platelets: 240 (NORMAL)"));
    assert!(html.contains("<svg"));
    assert!(html.contains("Dietary Recommendations"));
    assert!(html.contains("Always consult with your healthcare provider before starting any supplements."));
    assert!(html.contains("These are important safety considerations based on your results:"));
    assert!(html.contains(DISCLAIMER));
}

#[test]
fn html_reports_all_normal_without_recommendations() {
    let rows = vec![row("WBC", 6.0, "3.4-10.8", Status::Normal)];
    let html = render_html(&report(rows, RecommendationBundle::new()), None).unwrap();
    assert!(html.contains(ALL_NORMAL_MESSAGE));
    assert!(!html.contains("Personalized Recommendations"));
    assert!(!html.contains("<img"));
    assert!(html.contains(DISCLAIMER));
}

#[test]
fn html_without_rows_says_nothing_was_found() {
    let html = render_html(&report(vec![], RecommendationBundle::new()), None).unwrap();
    assert!(html.contains(NO_VALUES_MESSAGE));
    assert!(!html.contains("<svg"));
    assert!(!html.contains("Key Insights"));
}

#[test]
fn html_names_the_table_when_markers_lack_ranges() {
    let mut report = report(vec![], RecommendationBundle::new());
    report.unranged_markers = vec!["TSH".to_string()];
    let html = render_html(&report, None).unwrap();
    assert!(html.contains("1 marker found, none in range table basic."));
    assert!(!html.contains(NO_VALUES_MESSAGE));

    report.unranged_markers.push("Free T4".to_string());
    assert_eq!(
        no_results_message(&report),
        "2 markers found, none in range table basic."
    );
}

#[test]
fn html_escapes_document_text() {
    let mut report = report(abnormal_rows(), RecommendationBundle::new());
    report.source = "<scan>.png".to_string();
    report.warnings.push(ExtractionWarning {
        marker: "Platelets".to_string(),
        raw: "150,000".to_string(),
        message: "invalid float literal".to_string(),
    });
    let html = render_html(&report, None).unwrap();
    assert!(html.contains("&lt;scan&gt;.png"));
    assert!(!html.contains("<scan>"));
    assert!(html.contains("Unparsed Values"));
}

#[test]
fn json_round_trips_report() {
    let original = report(abnormal_rows(), RecommendationBundle::new());
    let json = render_json(&original).unwrap();
    assert!(json.ends_with('\n'));
    assert!(json.contains("\"generated_at\": \"2024-05-01T09:30:00Z\""));
    let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.rows, original.rows);
    assert_eq!(parsed.abnormal_count(), 2);
}
