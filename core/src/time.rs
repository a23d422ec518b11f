//! Time related utils.

use crate::Error;
use chrono::format::Fixed;
use chrono::format::Item;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into http date: `Tue, 01 Mar 2011 12:00:00 GMT`
///
/// This is the RFC 1123 form required by the `Date` header.
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse http date (`Tue, 01 Mar 2011 12:00:00 GMT`) into time.
pub fn parse_http_date(s: &str) -> crate::Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, "%a, %d %b %Y %H:%M:%S GMT").map_err(|e| {
        Error::unexpected("parse http date failed")
            .with_source(e)
            .with_context(format!("input: {s}"))
    })?;
    Ok(t.and_utc())
}

/// Format time into RFC 3339: `2022-03-01T08:12:34Z`
pub fn format_rfc3339(t: DateTime) -> String {
    t.format_with_items([Item::Fixed(Fixed::RFC3339)].iter())
        .to_string()
}

/// Parse RFC 3339 (`2009-11-19T19:37:58Z`) into time.
pub fn parse_rfc3339(s: &str) -> crate::Result<DateTime> {
    let t = chrono::DateTime::parse_from_rfc3339(s).map_err(|e| {
        Error::unexpected("parse rfc3339 failed")
            .with_source(e)
            .with_context(format!("input: {s}"))
    })?;
    Ok(t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2011, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(test_time()), "Tue, 01 Mar 2011 12:00:00 GMT");
    }

    #[test]
    fn test_parse_http_date() {
        let t = parse_http_date("Thu, 19 Nov 2009 19:37:58 GMT").expect("must be valid");
        assert_eq!(t, Utc.with_ymd_and_hms(2009, 11, 19, 19, 37, 58).unwrap());

        assert!(parse_http_date("2009-11-19T19:37:58Z").is_err());
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(format_rfc3339(test_time()), "2011-03-01T12:00:00+00:00");

        let t = parse_rfc3339("2009-11-19T19:37:58Z").expect("must be valid");
        assert_eq!(t, Utc.with_ymd_and_hms(2009, 11, 19, 19, 37, 58).unwrap());

        let t = parse_rfc3339("2011-03-01T13:00:00+01:00").expect("must be valid");
        assert_eq!(t, test_time());
    }
}
