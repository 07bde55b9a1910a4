//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::temporal::{MAX_SUPPORTED_DATE, MIN_SUPPORTED_DATE};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::date;

/// Strategy for dates between 2000-01-01 and roughly 2040
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..15_000).prop_map(|offset| date(2000, 1, 1) + Duration::days(offset))
}

/// Strategy for well-formed coverage windows `(start, end)` with `start <= end`
pub fn coverage_window_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..730).prop_map(|(start, length)| (start, start + Duration::days(length)))
}

/// Strategy for non-negative claim amounts with two decimal places
pub fn claim_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for negative claim amounts
pub fn negative_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(-cents, 2))
}

/// Strategy for ISO dates outside the supported range
pub fn unsupported_date_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (1i64..50_000).prop_map(|days| (MIN_SUPPORTED_DATE - Duration::days(days)).to_string()),
        (1i64..50_000).prop_map(|days| (MAX_SUPPORTED_DATE + Duration::days(days)).to_string()),
    ]
}

/// Strategy for strings that are not ISO dates
pub fn malformed_date_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("not-a-date".to_string()),
        Just("2025-13-01".to_string()),
        Just("2025-02-30".to_string()),
        Just("01/06/2025".to_string()),
        "[a-z]{1,12}",
    ]
}
