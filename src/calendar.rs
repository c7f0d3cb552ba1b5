//! Calendar-day arithmetic for scheduling
//!
//! Scheduling works on local calendar days, never on instants: a review at
//! 23:00 and one at 01:00 the next morning land on different days.
//!
//! Exchange format:
//! - real days are `YYYY-MM-DD`
//! - "never due" is `9999-12-31`
//! - "never reviewed" is `1970-01-01`

use std::fmt;

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Day format used everywhere a day is rendered or parsed
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Rendering of [`DueDate::Never`]
pub const NEVER_DUE: &str = "9999-12-31";

/// Rendering of a last-reviewed day for entries that were never reviewed
pub const NEVER_REVIEWED: &str = "1970-01-01";

/// Current local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The calendar day `n` days after `day`
pub fn add_days(day: NaiveDate, n: i64) -> NaiveDate {
    day + Duration::days(n)
}

/// Canonical `YYYY-MM-DD` rendering of a day
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` string
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DAY_FORMAT).ok()
}

/// Source of "today" for everything that schedules
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system's local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        today()
    }
}

/// Clock pinned to one day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Day on or after which an entry becomes eligible for review.
///
/// Variant order matters: the derived `Ord` puts `Never` after every real
/// day, so `Never <= today` is always false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DueDate {
    On(NaiveDate),
    Never,
}

impl DueDate {
    pub fn is_never(&self) -> bool {
        matches!(self, DueDate::Never)
    }

    /// Whether the date has arrived by `today`
    pub fn is_due_by(&self, today: NaiveDate) -> bool {
        *self <= DueDate::On(today)
    }

    /// Parse the exchange rendering, recognising the sentinel
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim() == NEVER_DUE {
            return Some(DueDate::Never);
        }
        parse_day(s).map(DueDate::On)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueDate::On(day) => write!(f, "{}", day.format(DAY_FORMAT)),
            DueDate::Never => f.write_str(NEVER_DUE),
        }
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DueDate::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid review date: {}", s)))
    }
}

/// Parse a last-reviewed rendering; `1970-01-01` means never reviewed
pub fn parse_last_reviewed(s: &str) -> Option<Option<NaiveDate>> {
    if s.trim() == NEVER_REVIEWED {
        return Some(None);
    }
    parse_day(s).map(Some)
}

/// Serde adapter for `Option<NaiveDate>` last-reviewed fields
pub mod last_reviewed {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_day, parse_last_reviewed, NEVER_REVIEWED};

    pub fn serialize<S: Serializer>(day: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match day {
            Some(day) => serializer.serialize_str(&format_day(*day)),
            None => serializer.serialize_str(NEVER_REVIEWED),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_last_reviewed(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid last reviewed date: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn test_add_days_rolls_over_month_and_year() {
        assert_eq!(add_days(day("2024-01-31"), 1), day("2024-02-01"));
        assert_eq!(add_days(day("2024-02-28"), 1), day("2024-02-29"));
        assert_eq!(add_days(day("2023-02-28"), 1), day("2023-03-01"));
        assert_eq!(add_days(day("2024-12-25"), 14), day("2025-01-08"));
    }

    #[test]
    fn test_format_day_is_zero_padded() {
        assert_eq!(format_day(day("2024-03-09")), "2024-03-09");
        assert_eq!(format_day(NaiveDate::from_ymd_opt(7, 1, 2).unwrap()), "0007-01-02");
    }

    #[test]
    fn test_never_sorts_after_every_day() {
        let latest = DueDate::On(day("9999-12-30"));
        assert!(DueDate::Never > latest);
        assert!(!DueDate::Never.is_due_by(day("9999-12-31")));
        assert!(DueDate::On(day("2024-03-10")).is_due_by(day("2024-03-10")));
        assert!(!DueDate::On(day("2024-03-11")).is_due_by(day("2024-03-10")));
    }

    #[test]
    fn test_due_date_serde_uses_sentinel() {
        assert_eq!(serde_json::to_string(&DueDate::Never).unwrap(), "\"9999-12-31\"");
        let parsed: DueDate = serde_json::from_str("\"9999-12-31\"").unwrap();
        assert_eq!(parsed, DueDate::Never);
        let parsed: DueDate = serde_json::from_str("\"2024-03-10\"").unwrap();
        assert_eq!(parsed, DueDate::On(day("2024-03-10")));
        assert!(serde_json::from_str::<DueDate>("\"tomorrow\"").is_err());
    }

    #[test]
    fn test_last_reviewed_sentinel() {
        assert_eq!(parse_last_reviewed("1970-01-01"), Some(None));
        assert_eq!(parse_last_reviewed("2024-03-10"), Some(Some(day("2024-03-10"))));
        assert_eq!(parse_last_reviewed("yesterday"), None);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(day("2024-03-10"));
        assert_eq!(clock.today(), day("2024-03-10"));
    }
}
