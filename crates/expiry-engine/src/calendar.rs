use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Datetime layouts accepted for end dates; only the date part is kept
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Calendar-day arithmetic for contract end dates
pub struct LeaseCalendar;

impl LeaseCalendar {
    /// Parse an end date written by the server.
    ///
    /// Returns `None` for empty or unrecognized text instead of guessing.
    pub fn parse_end_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }

        // Offset-carrying timestamps keep the date as written
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.date_naive());
        }

        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|timestamp| timestamp.date())
    }

    /// Whole calendar days from `reference` to `end` (negative once past)
    pub fn days_between(reference: NaiveDate, end: NaiveDate) -> i64 {
        end.signed_duration_since(reference).num_days()
    }

    /// Calendar date of an instant in its own timezone; the time of day is dropped
    pub fn reference_date<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
        now.date_naive()
    }

    /// Today in the local timezone
    pub fn today() -> NaiveDate {
        Self::reference_date(&Local::now())
    }
}
