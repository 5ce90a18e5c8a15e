//! Shared XML and filesystem helpers.

use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{ReportError, Result};

/// Map a quick-xml write failure to a render error for `document`.
pub(crate) fn render_error(document: &'static str) -> impl Fn(quick_xml::Error) -> ReportError {
    move |error| ReportError::Render {
        document,
        message: error.to_string(),
    }
}

/// Write `<name>text</name>`.
pub(crate) fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> std::result::Result<(), quick_xml::Error> {
    write_text_element_with(writer, BytesStart::new(name), text)
}

/// Write `start`, escaped `text`, and the matching end tag.
pub(crate) fn write_text_element_with<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    text: &str,
) -> std::result::Result<(), quick_xml::Error> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Format an SVG coordinate with one decimal.
pub(crate) fn coord(value: f64) -> String {
    format!("{value:.1}")
}

/// Write `bytes` to `path`, creating the parent directory if needed.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|error| ReportError::io(parent, error))?;
        }
    }
    std::fs::write(path, bytes).map_err(|error| ReportError::io(path, error))
}
