//! Tests for the temporal module
//!
//! Covers DateRange, supported date parsing and Timezone handling.

use chrono::{Duration, NaiveDate};
use core_kernel::temporal::{
    parse_supported_date, supported_range, DateRange, TemporalError, MAX_SUPPORTED_DATE,
    MIN_SUPPORTED_DATE,
};
use core_kernel::Timezone;
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod date_range {
    use super::*;

    #[test]
    fn test_boundaries_are_inclusive() {
        let range = DateRange::new(date(2024, 6, 1), date(2025, 6, 1)).unwrap();

        assert!(range.contains(date(2024, 6, 1)));
        assert!(range.contains(date(2025, 6, 1)));
        assert!(!range.contains(date(2024, 5, 31)));
        assert!(!range.contains(date(2025, 6, 2)));
    }

    #[test]
    fn test_leap_day_inside_range() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        assert!(range.contains(date(2024, 2, 29)));
    }

    #[test]
    fn test_serde_round_trip_uses_iso_dates() {
        let range = DateRange::new(date(2025, 1, 5), date(2025, 1, 10)).unwrap();
        let json = serde_json::to_value(range).unwrap();
        assert_eq!(json["start"], "2025-01-05");
        assert_eq!(json["end"], "2025-01-10");
    }
}

mod supported_dates {
    use super::*;

    #[test]
    fn test_range_constants() {
        assert_eq!(supported_range().start, MIN_SUPPORTED_DATE);
        assert_eq!(supported_range().end, MAX_SUPPORTED_DATE);
    }

    #[test]
    fn test_day_outside_each_bound_is_rejected() {
        let before = (MIN_SUPPORTED_DATE - Duration::days(1)).to_string();
        let after = (MAX_SUPPORTED_DATE + Duration::days(1)).to_string();

        assert!(matches!(
            parse_supported_date(&before),
            Err(TemporalError::OutOfSupportedRange(_))
        ));
        assert!(matches!(
            parse_supported_date(&after),
            Err(TemporalError::OutOfSupportedRange(_))
        ));
    }

    #[test]
    fn test_other_formats_are_rejected() {
        for input in ["", "01/02/2025", "2025-1-2x", "20250102", "2025-13-01"] {
            assert!(
                matches!(parse_supported_date(input), Err(TemporalError::Unparseable(_))),
                "expected {input:?} to be unparseable"
            );
        }
    }

    #[test]
    fn test_loose_iso_variants_are_rejected() {
        for input in [
            "2025-1-5",
            "2025-01-5",
            " 2025-01-01 ",
            "2025-01-01\n",
            "+2025-01-01",
            "-2025-01-01",
            "02025-01-01",
            "2025/01/01",
            "2025-01-01T00:00",
        ] {
            assert!(
                matches!(parse_supported_date(input), Err(TemporalError::Unparseable(_))),
                "expected {input:?} to be unparseable"
            );
        }
    }

    #[test]
    fn test_unparseable_keeps_raw_input() {
        assert_eq!(
            parse_supported_date(" 2025-01-01"),
            Err(TemporalError::Unparseable(" 2025-01-01".to_string()))
        );
    }
}

mod timezone {
    use super::*;

    #[test]
    fn test_serde_uses_iana_name() {
        let tz: Timezone = "Europe/Bucharest".parse().unwrap();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Europe/Bucharest\"");

        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tz);
    }

    #[test]
    fn test_deserialize_unknown_name_fails() {
        assert!(serde_json::from_str::<Timezone>("\"Nowhere/Special\"").is_err());
    }
}

proptest! {
    #[test]
    fn prop_contains_matches_bounds(
        start_offset in 0i64..3000,
        length in 0i64..800,
        day_offset in -100i64..4000,
    ) {
        let base = date(2000, 1, 1);
        let start = base + Duration::days(start_offset);
        let end = start + Duration::days(length);
        let day = base + Duration::days(day_offset);
        let range = DateRange::new(start, end).unwrap();

        prop_assert_eq!(range.contains(day), start <= day && day <= end);
    }

    #[test]
    fn prop_supported_dates_parse_back(offset in 0i64..73_000) {
        let day = MIN_SUPPORTED_DATE + Duration::days(offset);
        prop_assume!(day <= MAX_SUPPORTED_DATE);
        prop_assert_eq!(parse_supported_date(&day.to_string()), Ok(day));
    }
}
