use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {field} date '{value}', expected YYYY-MM-DD")]
pub struct DateParseError {
    pub field: &'static str,
    pub value: String,
}

/// Inclusive calendar-date range; an absent bound is unbounded on that side.
///
/// Only export applies this range. The on-screen table always pages over the
/// unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Parse form values; blank strings mean "no bound"
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, DateParseError> {
        Ok(Self {
            start: parse_bound("start", start)?,
            end: parse_bound("end", end)?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Compare by UTC calendar date, inclusive at both ends
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let date = timestamp.date_naive();
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

fn parse_bound(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, DateParseError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| DateParseError {
                field,
                value: raw.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn bounds_are_inclusive_whole_days() {
        let range = DateRange::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert!(range.contains(&at(2024, 1, 1, 0)));
        assert!(range.contains(&at(2024, 1, 31, 23)));
        assert!(!range.contains(&at(2023, 12, 31, 23)));
        assert!(!range.contains(&at(2024, 2, 1, 0)));
    }

    #[test]
    fn blank_bounds_are_unbounded() {
        let range = DateRange::parse(Some(""), None).unwrap();
        assert!(range.is_unbounded());
        assert!(range.contains(&at(1999, 1, 1, 0)));

        let from = DateRange::parse(Some("2024-01-10"), Some("  ")).unwrap();
        assert!(from.contains(&at(2030, 1, 1, 0)));
        assert!(!from.contains(&at(2024, 1, 9, 12)));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let range = DateRange::parse(Some("2024-02-01"), Some("2024-01-01")).unwrap();
        assert!(!range.contains(&at(2024, 1, 15, 0)));
    }

    #[test]
    fn rejects_malformed_dates() {
        let err = DateRange::parse(Some("01/02/2024"), None).unwrap_err();
        assert_eq!(err.field, "start");
        assert!(DateRange::parse(None, Some("2024-13-01")).is_err());
    }
}
