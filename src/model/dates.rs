//! `YYYY-MM-DD` date range validation.

use super::error::ValidationError;
use chrono::NaiveDate;

/// Longest value a date field accepts.
pub const DATE_LEN: usize = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != DATE_LEN {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Whether `value` is a strict `YYYY-MM-DD` date.
pub fn valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Whether a character may be typed into a date field.
pub fn is_date_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}

/// Check that both dates parse and `start` is on or before `end`.
pub fn validate_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
        return Err(ValidationError::DateFormat);
    };
    if start > end {
        return Err(ValidationError::DateOrder);
    }
    Ok((start, end))
}
