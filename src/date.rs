use chrono::{Datelike, Local, NaiveDate};

use crate::error::{Error, ErrorKind};

pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Strict parse of a canonical `YYYY-MM-DD` date. Loosely formatted input
/// that chrono would otherwise accept ("2024-5-1") is rejected; the canonical
/// form is zero-padded.
pub fn parse_canonical(input: &str) -> Result<NaiveDate, Error> {
    let date = NaiveDate::parse_from_str(input, CANONICAL_FORMAT)?;

    if format_canonical(date) != input {
        return Err(Error::new(
            ErrorKind::DateParse,
            format!("not in canonical form: '{}'", input).as_str(),
        ));
    }

    Ok(date)
}

/// Parse of a `YYYY-MM` string to the first day of that month.
pub fn parse_year_month(input: &str) -> Result<NaiveDate, Error> {
    parse_canonical(&format!("{}-01", input))
        .map_err(|err| Error::from(ErrorKind::YearMonthParse).with_msg(&err.to_string()))
}

pub fn format_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

pub fn format_year_month(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Lenient normalization: absent or malformed input falls back to the current
/// local date. This never fails; a widget state must always be renderable.
pub fn normalize(input: Option<&str>) -> NaiveDate {
    normalize_or(input, today())
}

/// Same as [`normalize`] but with an explicit fallback date.
pub fn normalize_or(input: Option<&str>, fallback: NaiveDate) -> NaiveDate {
    match input {
        Some(s) => match parse_canonical(s) {
            Ok(date) => date,
            Err(err) => {
                log::warn!(
                    "ignoring invalid date '{}', using {}: {}",
                    s,
                    format_canonical(fallback),
                    err
                );
                fallback
            }
        },
        None => fallback,
    }
}
