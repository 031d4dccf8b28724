//! Naive calendar dates
//!
//! `CalendarDate` is an immutable day value with no time-of-day and no
//! timezone. Day arithmetic goes through the calendar rather than through
//! epoch offsets, so stepping across month ends, leap days and DST changes
//! never skips or repeats a day.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::{ScheduleError, ScheduleResult};
use super::weekday::Weekday;

/// A calendar day in `yyyy-mm-dd` terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its components, `None` if the day does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a strict `yyyy-mm-dd` string
    ///
    /// Four-digit year, two-digit month and two-digit day are required;
    /// anything else is rejected as malformed rather than guessed at.
    ///
    /// # Examples
    ///
    /// ```
    /// use recurring_orders::schedule::CalendarDate;
    ///
    /// let date = CalendarDate::parse("2024-03-01").unwrap();
    /// assert_eq!(date.to_string(), "2024-03-01");
    /// assert!(CalendarDate::parse("2024-3-1").is_err());
    /// ```
    pub fn parse(value: &str) -> ScheduleResult<Self> {
        if !is_well_formed(value) {
            return Err(ScheduleError::MalformedDate(value.to_string()));
        }

        // Slices are ASCII digits at this point
        let year: i32 = value[0..4]
            .parse()
            .map_err(|_| ScheduleError::MalformedDate(value.to_string()))?;
        let month: u32 = value[5..7]
            .parse()
            .map_err(|_| ScheduleError::MalformedDate(value.to_string()))?;
        let day: u32 = value[8..10]
            .parse()
            .map_err(|_| ScheduleError::MalformedDate(value.to_string()))?;

        Self::from_ymd(year, month, day).ok_or_else(|| ScheduleError::InvalidDate(value.to_string()))
    }

    /// Shift by a signed number of calendar days
    ///
    /// Returns `None` when the result falls outside the representable range.
    pub fn add_days(self, days: i64) -> Option<Self> {
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.0.checked_add_days(magnitude)
        } else {
            self.0.checked_sub_days(magnitude)
        };
        shifted.map(Self)
    }

    /// The following calendar day
    pub fn succ(self) -> Option<Self> {
        self.add_days(1)
    }

    /// Day of week as 0 (Sunday) through 6 (Saturday)
    pub fn weekday_number(self) -> u8 {
        // num_days_from_sunday is always < 7
        self.0.weekday().num_days_from_sunday() as u8
    }

    pub fn weekday(self) -> Weekday {
        Weekday::from(self.0.weekday())
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// The underlying chrono value
    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn is_well_formed(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
