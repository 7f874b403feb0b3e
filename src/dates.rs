//! Calendar date handling for sample sheets, run parameters and the audit log.
//!
//! Instrument software is inconsistent about date encoding:
//!
//! | Source                        | Example                      |
//! |-------------------------------|------------------------------|
//! | `SampleSheet.csv` `Date`      | `15/06/2016`, `2016-06-15`   |
//! | `RunParameters.xml` run start | `160615`, `20160615`         |
//! | RFID tag expiration dates     | `2017-03-16T00:00:00`        |
//!
//! Every token is normalised to a [`NaiveDate`]; the audit log renders them
//! uniformly as `dd/MM/yyyy`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{Result, RunLogError};

/// strftime pattern used for every date column of the audit log
pub const AUDIT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Sample sheet date patterns tried in order when none are configured
pub const DEFAULT_SHEET_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Render a date as `dd/MM/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format(AUDIT_DATE_FORMAT).to_string()
}

/// Parse a sample sheet date, trying each strftime pattern in turn.
///
/// `source_file` and `field` only label the error.
pub fn parse_sheet_date<S: AsRef<str>>(
    source_file: &str,
    field: &str,
    value: &str,
    formats: &[S],
) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RunLogError::date(source_file, field, value));
    }

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt.as_ref()).ok())
        .ok_or_else(|| RunLogError::date(source_file, field, value))
}

/// Parse a run parameters date token.
///
/// Accepts compact `yyyyMMdd` and `yyMMdd` tokens as well as ISO-8601 dates
/// and timestamps (with or without fractional seconds and offset).
pub fn parse_run_date(source_file: &str, field: &str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    let parsed = if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        parse_compact(value)
    } else {
        parse_iso(value)
    };

    parsed.ok_or_else(|| RunLogError::date(source_file, field, value))
}

fn parse_compact(token: &str) -> Option<NaiveDate> {
    let (year, rest) = match token.len() {
        8 => (token[..4].parse::<i32>().ok()?, &token[4..]),
        // MiSeq writes RunStartDate as yyMMdd
        6 => (2000 + token[..2].parse::<i32>().ok()?, &token[2..]),
        _ => return None,
    };
    let month = rest[..2].parse().ok()?;
    let day = rest[2..4].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_iso(token: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(token, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(token, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()
}
