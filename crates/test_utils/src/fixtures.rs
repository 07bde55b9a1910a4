//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for cars, policies and claims.
//! These fixtures are consistent and predictable so tests can assert on
//! exact dates.

use chrono::NaiveDate;
use core_kernel::{CarId, OwnerId};
use domain_motor::{Car, InsuranceClaim, InsurancePolicy, Owner};
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::builders::{CarBuilder, ClaimBuilder, PolicyBuilder};

/// Builds a date, panicking on an impossible one
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}

/// Fixture for temporal test data
pub struct DateFixtures;

impl DateFixtures {
    /// Start of the reference policy (June 1, 2024)
    pub fn policy_start() -> NaiveDate {
        date(2024, 6, 1)
    }

    /// End of the reference policy (June 1, 2025)
    pub fn policy_end() -> NaiveDate {
        date(2025, 6, 1)
    }

    /// Day before the reference policy starts
    pub fn before_policy() -> NaiveDate {
        date(2024, 5, 31)
    }

    /// Day after the reference policy ends
    pub fn after_policy() -> NaiveDate {
        date(2025, 6, 2)
    }
}

/// Fixture for deterministic identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// Car identifier that is never present in any fixture
    pub fn unknown_car_id() -> CarId {
        CarId::from_uuid(Uuid::from_u128(0xdead_beef))
    }

    pub fn owner_id() -> OwnerId {
        OwnerId::from_uuid(Uuid::from_u128(1))
    }
}

/// A small fleet with known coverage
///
/// - `insured`: covered 2024-06-01..=2025-06-01, one claim on 2024-09-15
/// - `lapsed`: covered during 2024 only, with a gap on 2024-07-01
/// - `uninsured`: no policies at all
#[derive(Debug, Clone)]
pub struct ReferenceFleet {
    pub insured: Car,
    pub lapsed: Car,
    pub uninsured: Car,
    pub policies: Vec<InsurancePolicy>,
    pub claims: Vec<InsuranceClaim>,
}

impl ReferenceFleet {
    pub fn new() -> Self {
        let owner = Owner {
            id: IdFixtures::owner_id(),
            name: "Ana Popescu".to_string(),
            email: Some("ana.popescu@example.com".to_string()),
        };

        let insured = CarBuilder::new()
            .with_vin("VIN12345")
            .with_make("Dacia")
            .with_model("Logan")
            .with_year(2018)
            .with_owner(owner.clone())
            .build();
        let lapsed = CarBuilder::new()
            .with_vin("VIN67890")
            .with_make("VW")
            .with_model("Golf")
            .with_year(2021)
            .with_owner(owner)
            .build();
        let uninsured = CarBuilder::new().with_vin("VIN00000").build();

        let policies = vec![
            PolicyBuilder::new(insured.id)
                .with_provider("Allianz")
                .covering(DateFixtures::policy_start(), DateFixtures::policy_end())
                .build(),
            PolicyBuilder::new(lapsed.id)
                .with_provider("Groupama")
                .covering(date(2024, 1, 1), date(2024, 6, 30))
                .build(),
            PolicyBuilder::new(lapsed.id)
                .with_provider("Groupama")
                .covering(date(2024, 7, 2), date(2024, 12, 31))
                .build(),
        ];

        let claims = vec![ClaimBuilder::new(insured.id)
            .on(date(2024, 9, 15))
            .with_description("Rear bumper damage")
            .with_amount(dec!(1200.00))
            .build()];

        Self {
            insured,
            lapsed,
            uninsured,
            policies,
            claims,
        }
    }

    pub fn cars(&self) -> Vec<Car> {
        vec![self.insured.clone(), self.lapsed.clone(), self.uninsured.clone()]
    }
}

impl Default for ReferenceFleet {
    fn default() -> Self {
        Self::new()
    }
}
