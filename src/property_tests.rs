//! Property-based tests for date expansion and batching

#[cfg(test)]
mod tests {
    use crate::job::chunk_records;
    use crate::schedule::{expand, CalendarDate, Weekday, WeekdaySet};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn any_date() -> impl Strategy<Value = CalendarDate> {
        // 1900-01-01 through roughly 2100
        (0i64..73_000).prop_map(|offset| {
            let epoch = CalendarDate::from(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
            epoch.add_days(offset).unwrap()
        })
    }

    fn any_weekdays() -> impl Strategy<Value = WeekdaySet> {
        prop::collection::vec(0u8..7, 0..10).prop_map(|numbers| {
            numbers
                .into_iter()
                .filter_map(Weekday::from_number)
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_expand_stays_in_range_and_on_selected_days(
            start in any_date(),
            span in 0i64..400,
            weekdays in any_weekdays(),
        ) {
            let end = start.add_days(span).unwrap();
            let dates = expand(start, end, &weekdays);

            for date in &dates {
                prop_assert!(*date >= start && *date <= end);
                prop_assert!(weekdays.contains_number(date.weekday_number()));
            }
            // Strictly ascending
            for pair in dates.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        #[test]
        fn test_expand_finds_every_matching_day(
            start in any_date(),
            span in 0i64..120,
            weekdays in any_weekdays(),
        ) {
            let end = start.add_days(span).unwrap();
            let dates = expand(start, end, &weekdays);

            let expected = (0..=span)
                .filter_map(|offset| start.add_days(offset))
                .filter(|day| weekdays.contains(day.weekday()))
                .count();
            prop_assert_eq!(dates.len(), expected);
        }

        #[test]
        fn test_expand_is_pure(
            start in any_date(),
            span in -30i64..200,
            weekdays in any_weekdays(),
        ) {
            let end = start.add_days(span).unwrap();
            prop_assert_eq!(expand(start, end, &weekdays), expand(start, end, &weekdays));
        }

        #[test]
        fn test_reversed_range_is_empty(
            start in any_date(),
            back in 1i64..1000,
            weekdays in any_weekdays(),
        ) {
            let end = start.add_days(-back).unwrap();
            prop_assert!(expand(start, end, &weekdays).is_empty());
        }

        #[test]
        fn test_format_parse_round_trip(date in any_date()) {
            let rendered = date.to_string();
            prop_assert_eq!(rendered.len(), 10);
            let parsed = CalendarDate::parse(&rendered).unwrap();
            prop_assert_eq!(parsed, date);
            prop_assert_eq!(parsed.to_string(), rendered);
        }

        #[test]
        fn test_well_formed_strings_round_trip(
            year in 0i32..10_000,
            month in 1u32..=12,
            day in 1u32..=28,
        ) {
            let s = format!("{:04}-{:02}-{:02}", year, month, day);
            prop_assert_eq!(CalendarDate::parse(&s).unwrap().to_string(), s);
        }

        #[test]
        fn test_chunking_preserves_sequence(
            items in prop::collection::vec(any::<u32>(), 0..500),
            limit in 1usize..80,
        ) {
            let chunks = chunk_records(items.clone(), limit);

            prop_assert_eq!(chunks.concat(), items.clone());
            prop_assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= limit));
            if let Some((_, full)) = chunks.split_last() {
                prop_assert!(full.iter().all(|c| c.len() == limit));
            }
            prop_assert_eq!(chunks.len(), items.len().div_ceil(limit));
        }
    }
}
