//! SVG rendering of the bar chart.

use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use tracing::debug;

use crate::chart::BarChart;
use crate::common::{coord, render_error, write_file, write_text_element_with};
use crate::error::Result;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const PLOT_HEIGHT: f64 = 240.0;
const BAR_WIDTH: f64 = 36.0;
const BAR_GAP: f64 = 24.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 72.0;

/// Chart canvas size in pixels for `bar_count` bars.
pub fn chart_dimensions(bar_count: usize) -> (f64, f64) {
    let width = MARGIN_LEFT * 2.0 + bar_count.max(1) as f64 * (BAR_WIDTH + BAR_GAP);
    let height = MARGIN_TOP + PLOT_HEIGHT + MARGIN_BOTTOM;
    (width, height)
}

/// Render the chart as a standalone SVG document.
pub fn render_svg(chart: &BarChart) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_chart(&mut xml, chart).map_err(render_error("svg chart"))?;
    let mut bytes = xml.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the chart to `path`.
pub fn write_svg_chart(path: &Path, chart: &BarChart) -> Result<()> {
    let svg = render_svg(chart)?;
    write_file(path, svg.as_bytes())?;
    debug!(path = %path.display(), bars = chart.bars.len(), "wrote svg chart");
    Ok(())
}

/// Write the `<svg>` element into an existing document.
pub(crate) fn write_chart<W: Write>(
    xml: &mut Writer<W>,
    chart: &BarChart,
) -> std::result::Result<(), quick_xml::Error> {
    let (width, height) = chart_dimensions(chart.bars.len());
    let width_attr = coord(width);
    let height_attr = coord(height);
    let view_box = format!("0 0 {width_attr} {height_attr}");

    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", SVG_NS));
    root.push_attribute(("width", width_attr.as_str()));
    root.push_attribute(("height", height_attr.as_str()));
    root.push_attribute(("viewBox", view_box.as_str()));
    root.push_attribute(("role", "img"));
    xml.write_event(Event::Start(root))?;

    let mut title = BytesStart::new("text");
    let center = coord(width / 2.0);
    title.push_attribute(("class", "title"));
    title.push_attribute(("x", center.as_str()));
    title.push_attribute(("y", "24.0"));
    title.push_attribute(("text-anchor", "middle"));
    title.push_attribute(("font-size", "16"));
    write_text_element_with(xml, title, &chart.title)?;

    let baseline = MARGIN_TOP + PLOT_HEIGHT;
    let axis_x = coord(MARGIN_LEFT - BAR_GAP / 2.0);
    let axis_end = coord(width - MARGIN_LEFT + BAR_GAP / 2.0);
    let baseline_attr = coord(baseline);
    let mut axis = BytesStart::new("line");
    axis.push_attribute(("class", "axis"));
    axis.push_attribute(("x1", axis_x.as_str()));
    axis.push_attribute(("y1", baseline_attr.as_str()));
    axis.push_attribute(("x2", axis_end.as_str()));
    axis.push_attribute(("y2", baseline_attr.as_str()));
    axis.push_attribute(("stroke", "#555555"));
    xml.write_event(Event::Empty(axis))?;

    let max = chart.max_value();
    for (index, bar) in chart.bars.iter().enumerate() {
        let bar_height = if max > 0.0 && bar.value > 0.0 {
            bar.value / max * PLOT_HEIGHT
        } else {
            0.0
        };
        let x = MARGIN_LEFT + index as f64 * (BAR_WIDTH + BAR_GAP);
        let x_center = coord(x + BAR_WIDTH / 2.0);
        let top = baseline - bar_height;

        let mut group = BytesStart::new("g");
        group.push_attribute(("class", "bar"));
        group.push_attribute(("data-marker", bar.marker.as_str()));
        group.push_attribute(("data-status", bar.status.as_str()));
        xml.write_event(Event::Start(group))?;

        let (x_attr, y_attr) = (coord(x), coord(top));
        let (w_attr, h_attr) = (coord(BAR_WIDTH), coord(bar_height));
        let mut rect = BytesStart::new("rect");
        rect.push_attribute(("x", x_attr.as_str()));
        rect.push_attribute(("y", y_attr.as_str()));
        rect.push_attribute(("width", w_attr.as_str()));
        rect.push_attribute(("height", h_attr.as_str()));
        rect.push_attribute(("fill", bar.color()));
        xml.write_event(Event::Empty(rect))?;

        let value_y = coord(top - 6.0);
        let mut value = BytesStart::new("text");
        value.push_attribute(("class", "value"));
        value.push_attribute(("x", x_center.as_str()));
        value.push_attribute(("y", value_y.as_str()));
        value.push_attribute(("text-anchor", "middle"));
        value.push_attribute(("font-size", "11"));
        write_text_element_with(xml, value, &bar.label)?;

        let label_y = coord(baseline + 14.0);
        let rotate = format!("rotate(45 {x_center} {label_y})");
        let mut label = BytesStart::new("text");
        label.push_attribute(("class", "marker"));
        label.push_attribute(("x", x_center.as_str()));
        label.push_attribute(("y", label_y.as_str()));
        label.push_attribute(("transform", rotate.as_str()));
        label.push_attribute(("font-size", "11"));
        write_text_element_with(xml, label, &bar.marker)?;

        xml.write_event(Event::End(BytesEnd::new("g")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("svg")))?;
    Ok(())
}
