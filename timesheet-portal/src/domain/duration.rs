//! Shape check for `hours:minutes` input.

const SEPARATOR: char = ':';

/// True when `text` contains exactly one `:`.
///
/// Only the shape is checked: neither part has to be numeric or in range, and an empty hour
/// part (`":30"`) is accepted.
pub fn is_valid_duration(text: &str) -> bool {
    match text.split_once(SEPARATOR) {
        Some((_, rest)) => !rest.contains(SEPARATOR),
        None => false,
    }
}

/// Decimal hours for a numeric `h:mm` value, `None` for anything else.
pub fn parse_duration_hours(text: &str) -> Option<f64> {
    if !is_valid_duration(text) {
        return None;
    }

    let (hours, minutes) = text.trim().split_once(SEPARATOR)?;
    let hours: u32 = if hours.is_empty() { 0 } else { hours.parse().ok()? };
    let minutes: u32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    Some(hours as f64 + minutes as f64 / 60.0)
}
