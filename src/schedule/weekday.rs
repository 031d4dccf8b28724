//! Weekday selectors and selector sets

use std::fmt;
use std::str::FromStr;

use super::error::ScheduleError;

/// One of the seven named days an order can repeat on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    /// All weekdays in day-number order
    pub const ALL: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    /// Day number, 0 (Sunday) through 6 (Saturday)
    pub fn number(self) -> u8 {
        match self {
            Weekday::Sun => 0,
            Weekday::Mon => 1,
            Weekday::Tue => 2,
            Weekday::Wed => 3,
            Weekday::Thu => 4,
            Weekday::Fri => 5,
            Weekday::Sat => 6,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number)).copied()
    }

    /// Name as stored in the orders table
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sun => "Sun",
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
        }
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.name() == s)
            .ok_or_else(|| ScheduleError::UnknownWeekday(s.to_string()))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Weekday::Sun,
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unordered set of weekdays, duplicates collapse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.number();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.contains_number(day.number())
    }

    /// Membership test against a 0-6 day number; out-of-range numbers are never members
    pub fn contains_number(&self, number: u8) -> bool {
        number < 7 && self.0 & (1 << number) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in day-number order
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|day| self.contains(*day))
    }

    /// Parse a collection of weekday names, failing on the first unknown one
    pub fn parse_names<I, S>(names: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| name.as_ref().parse::<Weekday>())
            .collect()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Weekday> for WeekdaySet {
    fn extend<T: IntoIterator<Item = Weekday>>(&mut self, iter: T) {
        for day in iter {
            self.insert(day);
        }
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Weekday::name).collect();
        f.write_str(&names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_numbers_cover_zero_to_six() {
        let numbers: Vec<u8> = Weekday::ALL.iter().map(|d| d.number()).collect();
        assert_eq!(numbers, vec![0, 1, 2, 3, 4, 5, 6]);
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_number(day.number()), Some(day));
        }
        assert_eq!(Weekday::from_number(7), None);
    }

    #[test]
    fn test_weekday_from_name() {
        assert_eq!("Mon".parse::<Weekday>(), Ok(Weekday::Mon));
        assert_eq!("Sat".parse::<Weekday>(), Ok(Weekday::Sat));
        assert_eq!(
            "Monday".parse::<Weekday>(),
            Err(ScheduleError::UnknownWeekday("Monday".to_string()))
        );
        // Names are matched exactly as stored
        assert!("mon".parse::<Weekday>().is_err());
        assert!("".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_set_collapses_duplicates() {
        let set: WeekdaySet = [Weekday::Mon, Weekday::Wed, Weekday::Mon].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Wed));
        assert!(!set.contains(Weekday::Tue));
    }

    #[test]
    fn test_set_order_irrelevant() {
        let a = WeekdaySet::parse_names(["Fri", "Sun"]).unwrap();
        let b = WeekdaySet::parse_names(["Sun", "Fri", "Fri"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Sun, Fri");
    }

    #[test]
    fn test_parse_names_rejects_unknown() {
        let err = WeekdaySet::parse_names(["Mon", "Funday", "Tue"]).unwrap_err();
        assert_eq!(err, ScheduleError::UnknownWeekday("Funday".to_string()));
    }

    #[test]
    fn test_contains_number_out_of_range() {
        let set: WeekdaySet = Weekday::ALL.into_iter().collect();
        assert_eq!(set.len(), 7);
        assert!(set.contains_number(6));
        assert!(!set.contains_number(7));
        assert!(!set.contains_number(200));
    }

    #[test]
    fn test_empty_set() {
        let set = WeekdaySet::parse_names(Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
