//! Numeric value parsing.

use std::num::ParseFloatError;

use lab_model::Comparator;

/// Strip a leading `<`/`>` and parse the remainder as a float.
///
/// ```
/// use lab_extract::parse_marker_value;
/// use lab_model::Comparator;
///
/// assert_eq!(parse_marker_value("11.5"), Ok((None, 11.5)));
/// assert_eq!(parse_marker_value("< 0.5"), Ok((Some(Comparator::Less), 0.5)));
/// assert!(parse_marker_value("12.0.1").is_err());
/// ```
pub fn parse_marker_value(raw: &str) -> Result<(Option<Comparator>, f64), ParseFloatError> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let comparator = chars.next().and_then(Comparator::from_symbol);
    let number = match comparator {
        Some(_) => chars.as_str().trim_start(),
        None => trimmed,
    };
    number.parse::<f64>().map(|value| (comparator, value))
}
