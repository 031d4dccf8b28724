//! Expansion of a date range and weekday set into matching dates

use std::iter::FusedIterator;

use super::date::CalendarDate;
use super::weekday::WeekdaySet;

/// Inclusive day-by-day walk from a start date to an end date
///
/// Empty when start is after end. Stops at the last representable date
/// instead of wrapping.
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<CalendarDate>,
    end: CalendarDate,
}

impl DateRange {
    pub fn inclusive(start: CalendarDate, end: CalendarDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for DateRange {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.succ().filter(|day| *day <= self.end);
        Some(current)
    }
}

impl FusedIterator for DateRange {}

/// Every date in `[start, end]` whose weekday is in `weekdays`, ascending
///
/// # Examples
///
/// ```
/// use recurring_orders::schedule::{expand, CalendarDate, Weekday, WeekdaySet};
///
/// let start = CalendarDate::parse("2024-03-01").unwrap();
/// let end = CalendarDate::parse("2024-03-10").unwrap();
/// let days: WeekdaySet = [Weekday::Mon, Weekday::Wed].into_iter().collect();
///
/// let dates: Vec<String> = expand(start, end, &days).iter().map(|d| d.to_string()).collect();
/// assert_eq!(dates, vec!["2024-03-04", "2024-03-06"]);
/// ```
pub fn expand(start: CalendarDate, end: CalendarDate, weekdays: &WeekdaySet) -> Vec<CalendarDate> {
    if weekdays.is_empty() {
        return Vec::new();
    }

    DateRange::inclusive(start, end)
        .filter(|day| weekdays.contains_number(day.weekday_number()))
        .collect()
}
