//! Conversion between wire date-times and display/edit formats
//!
//! The backend speaks RFC 3339 instants and ISO dates. Forms and tables use
//! the configured `date_time_format` / `date_format` (chrono strftime
//! syntax). All conversions are done in UTC.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::{Display, Write};

/// Long date-time format used by edit inputs and tables
pub const DATE_TIME_LONG_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Date format used by date inputs and tables
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats and parses date values for one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DateFormatter {
    date_time_format: String,
    date_format: String,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(DATE_TIME_LONG_FORMAT, DATE_FORMAT)
    }
}

impl DateFormatter {
    pub fn new(date_time_format: impl Into<String>, date_format: impl Into<String>) -> Self {
        Self {
            date_time_format: date_time_format.into(),
            date_format: date_format.into(),
        }
    }

    pub fn date_time_format(&self) -> &str {
        &self.date_time_format
    }

    /// Server instant to the long display/edit form
    ///
    /// `None` stays `None`; so does a date the format cannot render.
    pub fn convert_date_time_from_server(&self, date: Option<DateTime<Utc>>) -> Option<String> {
        render(date?.format(&self.date_time_format))
    }

    /// Edit-form input back to an instant; `None` for blank or malformed input
    pub fn convert_date_time_to_server(&self, input: &str) -> Option<DateTime<Utc>> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        NaiveDateTime::parse_from_str(input, &self.date_time_format)
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Calendar date to the display form
    pub fn format_date(&self, date: Option<NaiveDate>) -> Option<String> {
        render(date?.format(&self.date_format))
    }

    /// Parse a date-time string as sent by the server (RFC 3339)
    pub fn parse_server_date_time(value: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }
}

/// Whether `format` is a strftime string chrono can use
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn render(formatted: impl Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{formatted}").ok()?;
    Some(out)
}

/// [`DateFormatter::convert_date_time_from_server`] with the default format
pub fn convert_date_time_from_server(date: Option<DateTime<Utc>>) -> Option<String> {
    DateFormatter::default().convert_date_time_from_server(date)
}

/// [`DateFormatter::convert_date_time_to_server`] with the default format
pub fn convert_date_time_to_server(input: &str) -> Option<DateTime<Utc>> {
    DateFormatter::default().convert_date_time_to_server(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_server_null_is_null() {
        assert_eq!(convert_date_time_from_server(None), None);
    }

    #[test]
    fn test_from_server_uses_long_format() {
        let date = Utc.with_ymd_and_hms(2019, 6, 3, 14, 7, 59).unwrap();
        assert_eq!(
            convert_date_time_from_server(Some(date)),
            Some("2019-06-03 14:07".to_string())
        );
    }

    #[test]
    fn test_custom_format() {
        let fmt = DateFormatter::new("%d/%m/%Y %H:%M", "%d/%m/%Y");
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(
            fmt.convert_date_time_from_server(Some(date)),
            Some("15/01/2024 08:30".to_string())
        );
        assert_eq!(
            fmt.format_date(NaiveDate::from_ymd_opt(2024, 1, 15)),
            Some("15/01/2024".to_string())
        );
    }

    #[test]
    fn test_unusable_format_yields_none() {
        let fmt = DateFormatter::new("%Y-%m-%d %Q", "%Q");
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(fmt.convert_date_time_from_server(Some(date)), None);
        assert_eq!(fmt.format_date(NaiveDate::from_ymd_opt(2024, 1, 15)), None);
    }

    #[test]
    fn test_is_valid_format() {
        assert!(is_valid_format(DATE_TIME_LONG_FORMAT));
        assert!(is_valid_format("%d/%m/%Y"));
        assert!(!is_valid_format("%Y-%m-%d %Q"));
    }

    #[test]
    fn test_to_server() {
        assert_eq!(
            convert_date_time_to_server("2019-06-03 14:07"),
            Some(Utc.with_ymd_and_hms(2019, 6, 3, 14, 7, 0).unwrap())
        );
        assert_eq!(convert_date_time_to_server("  "), None);
        assert_eq!(convert_date_time_to_server("03/06/2019"), None);
    }

    #[test]
    fn test_parse_server_date_time() {
        let parsed = DateFormatter::parse_server_date_time("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
        assert!(DateFormatter::parse_server_date_time("yesterday").is_none());
    }
}
