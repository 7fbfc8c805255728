// Canonical date handling: YYYY-MM-DD rendering, raw timestamp parsing, clocks

use crate::models::RawTimestamp;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Offset-less layouts tried after RFC 3339 and RFC 2822
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Zone whose calendar fields are used when rendering a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateZone {
    /// Platform time zone
    #[default]
    Local,
    Utc,
}

impl DateZone {
    fn calendar_date(self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            DateZone::Local => instant.with_timezone(&Local).date_naive(),
            DateZone::Utc => instant.date_naive(),
        }
    }
}

/// Source of "now" for status updates
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render `instant` as `YYYY-MM-DD` in `zone`
pub fn format_date(instant: DateTime<Utc>, zone: DateZone) -> String {
    format_calendar(zone.calendar_date(instant))
}

fn format_calendar(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Normalize a raw timestamp to `YYYY-MM-DD`; `None` if it cannot be parsed
///
/// A bare calendar date is kept as written. This departs from reading it as
/// UTC midnight, which west of UTC renders as the previous day in `Local`.
/// Text without an offset is wall-clock time in `zone`, so its own date is
/// the calendar date, even inside a DST gap.
pub fn normalize(raw: &RawTimestamp, zone: DateZone) -> Option<String> {
    match raw {
        RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| format_date(dt, zone)),
        RawTimestamp::Text(text) => {
            let text = text.trim();
            if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                return Some(format_calendar(date));
            }
            if let Some(instant) = parse_instant(text) {
                return Some(format_date(instant, zone));
            }
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|naive| format_calendar(naive.date()))
        }
    }
}

fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    None
}
