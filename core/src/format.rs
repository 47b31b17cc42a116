//! Display helpers shared by the views.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an API timestamp as a Spanish short date (`d/m/yyyy`).
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00Z`), offset-less ISO timestamps as
/// emitted by the API (`2024-01-15T10:30:00.1234567`) and bare dates. Anything
/// else is shown verbatim.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(date) => date.format("%-d/%-m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Parse an integer the way an HTML number input hands it over: leading
/// whitespace is skipped, an optional sign and leading digits are read, and
/// anything unparsable becomes 0.
pub fn parse_leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().unwrap_or(0);
    if negative {
        -value
    } else {
        value
    }
}

/// `"1 disponible"` / `"3 disponibles"`, plural picked by count.
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339() {
        assert_eq!(format_date("2024-01-05T10:30:00Z"), "5/1/2024");
    }

    #[test]
    fn formats_offsetless_timestamp_with_fraction() {
        assert_eq!(format_date("2024-11-20T08:15:42.1234567"), "20/11/2024");
    }

    #[test]
    fn formats_bare_date() {
        assert_eq!(format_date("2023-12-31"), "31/12/2023");
    }

    #[test]
    fn unparsable_date_is_shown_verbatim() {
        assert_eq!(format_date("ayer"), "ayer");
    }

    #[test]
    fn leading_int_follows_number_input_rules() {
        assert_eq!(parse_leading_int("12"), 12);
        assert_eq!(parse_leading_int("  7 copias"), 7);
        assert_eq!(parse_leading_int("-3"), -3);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int("-"), 0);
    }

    #[test]
    fn plural_picks_form_by_count() {
        assert_eq!(plural(1, "libro", "libros"), "1 libro");
        assert_eq!(plural(0, "libro", "libros"), "0 libros");
    }
}
