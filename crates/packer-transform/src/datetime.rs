//! Date cell parsing and rendering.
//!
//! Date columns arrive in whatever shape the clinical source stored them:
//! RFC 3339 timestamps, naive ISO dates, Java `Date.toString()` renderings or
//! epoch milliseconds. Parsed values are re-rendered with the configured
//! calendar format; anything unparsable is left alone.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use packer_model::CellValue;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];

/// `Date.toString()` layout once the timezone token is removed.
const JAVA_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Parse a date cell. `configured` is tried first so rendered cells parse
/// back to themselves.
pub fn parse_date(value: &CellValue, configured: &str) -> Option<NaiveDateTime> {
    match value {
        CellValue::Missing => None,
        CellValue::Number(millis) => parse_epoch_millis(*millis),
        CellValue::Text(text) => parse_date_text(text.trim(), configured),
    }
}

fn parse_epoch_millis(millis: f64) -> Option<NaiveDateTime> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|timestamp| timestamp.naive_utc())
}

fn parse_date_text(text: &str, configured: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }
    if let Some(parsed) = parse_with(text, configured) {
        return Some(parsed);
    }
    // Timestamps keep the date as written; the offset is not applied.
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    parse_java_date(text)
}

fn parse_with(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// `Wed Mar 07 01:00:00 CET 2018`; the zone abbreviation is ignored.
fn parse_java_date(text: &str) -> Option<NaiveDateTime> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [weekday, month, day, time, _zone, year] = tokens.as_slice() else {
        return None;
    };
    let without_zone = format!("{weekday} {month} {day} {time} {year}");
    NaiveDateTime::parse_from_str(&without_zone, JAVA_DATE_FORMAT).ok()
}

/// Render with a strftime format, `None` when chrono cannot render it.
pub fn format_date(value: &NaiveDateTime, format: &str) -> Option<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", value.format(format)).ok()?;
    Some(rendered)
}

/// Re-render a date cell, or `None` when it does not parse as a date.
pub fn reformat_date(value: &CellValue, format: &str) -> Option<String> {
    parse_date(value, format).and_then(|parsed| format_date(&parsed, format))
}
