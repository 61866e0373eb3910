//! Wall-clock access and the textual timestamp stored on every entry.
//!
//! Entries carry `DD/MM/YYYY hh:mm AM|PM` strings stamped in local time when
//! they are created or updated. Grouping and filtering only ever look at the
//! date half of that text.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %I:%M %p";

/// Clock abstracts access to the current local time so services remain
/// deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Formats a timestamp as `DD/MM/YYYY hh:mm AM|PM`. Midnight and noon
/// render as `12`.
pub fn format_timestamp(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Day, month, and year read back from a stored timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl DateParts {
    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month,
        }
    }
}

/// A `(year, month)` period. Orders by year first, then month; displays as
/// `MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// Reads the `DD/MM/YYYY` prefix of a stored timestamp. Anything after the
/// first whitespace is ignored, so 24-hour or date-only records still parse.
pub fn parse_date(text: &str) -> Option<DateParts> {
    let date = text.split_whitespace().next()?;
    let mut parts = date.split('/');
    let day = parse_digits(parts.next()?, 1, 2)?;
    let month = parse_digits(parts.next()?, 1, 2)?;
    let year_text = parts.next()?;
    if parts.next().is_some() || year_text.len() != 4 {
        return None;
    }
    let year = parse_digits(year_text, 4, 4)?;
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return None;
    }
    Some(DateParts {
        day,
        month,
        year: year as i32,
    })
}

/// Extracts the grouping key of a stored timestamp, or `None` when the text
/// is absent or malformed.
pub fn month_key(text: Option<&str>) -> Option<MonthKey> {
    text.and_then(parse_date).map(|parts| parts.month_key())
}

fn parse_digits(text: &str, min: usize, max: usize) -> Option<u32> {
    if text.len() < min || text.len() > max || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
