use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::item::NO_DATE;

/// Parse a calendar date from the forms reference managers export.
///
/// Accepted, in order: RFC 3339 / ISO 8601 timestamps (fractional seconds and offsets optional),
/// `Y-M-D`, and US-style `M/D/Y` with or without leading zeros. `M/D/Y` needs a four-digit
/// year, so `03/15/20` is not read as the year 20. The date is taken in the timestamp's own
/// offset; no timezone conversion happens.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    static US_DATE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap());
    if US_DATE_RE.is_match(s) {
        return NaiveDate::parse_from_str(s, "%m/%d/%Y").ok();
    }
    None
}

/// Year label for citations: `"2020, March 15"` for a full date, `"2020"` when only a leading
/// year can be found, [`NO_DATE`] otherwise.
pub fn display_year(raw: &str) -> String {
    let s = raw.trim();
    if let Some(date) = parse_date(s) {
        return date.format("%Y, %B %-d").to_string();
    }
    leading_year(s)
        .map(str::to_string)
        .unwrap_or_else(|| NO_DATE.to_string())
}

/// A leading run of four digits.
pub fn leading_year(s: &str) -> Option<&str> {
    static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}").unwrap());
    YEAR_RE.find(s.trim_start()).map(|m| m.as_str())
}

/// The year a display label falls under, ignoring month and day.
pub fn year_bucket(display: &str) -> &str {
    leading_year(display).unwrap_or(NO_DATE)
}

/// `"March 15, 2020"`, or the input unchanged when it cannot be parsed.
pub fn long_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_year_variants() {
        assert_eq!(display_year("2020-03-15T10:00:00Z"), "2020, March 15");
        assert_eq!(display_year("2020-03-15T10:00:00.123+02:00"), "2020, March 15");
        assert_eq!(display_year("2020-03-15T23:30:00-0500"), "2020, March 15");
        assert_eq!(display_year("2020-03-15T10:00:00"), "2020, March 15");
        assert_eq!(display_year("2020-03-15"), "2020, March 15");
        assert_eq!(display_year("03/15/2020"), "2020, March 15");
        assert_eq!(display_year("3/5/2020"), "2020, March 5");
        assert_eq!(display_year("03/15/20"), NO_DATE);
        assert_eq!(display_year("03/15/020"), NO_DATE);
        assert_eq!(display_year("2020-03"), "2020");
        assert_eq!(display_year("1999"), "1999");
        assert_eq!(display_year("not-a-date"), NO_DATE);
        assert_eq!(display_year(""), NO_DATE);
    }

    #[test]
    fn year_bucket_drops_month_and_day() {
        assert_eq!(year_bucket("2020, March 15"), "2020");
        assert_eq!(year_bucket("2020"), "2020");
        assert_eq!(year_bucket(NO_DATE), NO_DATE);
    }

    #[test]
    fn long_date_falls_back_to_raw_text() {
        assert_eq!(long_date("2021-07-04T08:00:00Z"), "July 4, 2021");
        assert_eq!(long_date(" last spring "), "last spring");
        assert_eq!(long_date("07/04/21"), "07/04/21");
    }

    #[test]
    fn any_calendar_date_survives_iso_round_trip() {
        proptest::proptest!(|(y in 1000i32..=9999, m in 1u32..=12, d in 1u32..=28)| {
            let iso = format!("{y:04}-{m:02}-{d:02}");
            let us = format!("{m}/{d}/{y:04}");
            let expected = NaiveDate::from_ymd_opt(y, m, d);
            proptest::prop_assert_eq!(parse_date(&iso), expected);
            proptest::prop_assert_eq!(parse_date(&us), expected);
        })
    }
}
