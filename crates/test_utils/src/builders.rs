//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.
//!
//! Builders write struct fields directly, so they can also produce records
//! that break domain invariants (a policy without an end date, say) when a
//! test needs one.

use chrono::{NaiveDate, Utc};
use core_kernel::{CarId, ClaimId, PolicyId};
use domain_motor::{Car, InsuranceClaim, InsurancePolicy, NewClaim, Owner};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::DateFixtures;

/// Builder for constructing test cars
pub struct CarBuilder {
    id: CarId,
    vin: String,
    make: String,
    model: String,
    year_of_manufacture: i32,
    owner: Option<Owner>,
}

impl Default for CarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CarBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        let id = CarId::new_v7();
        Self {
            id,
            // unique per car so the VIN constraint holds across a test run
            vin: format!("TESTVIN-{}", id.as_uuid().simple()),
            make: "Dacia".to_string(),
            model: "Sandero".to_string(),
            year_of_manufacture: 2020,
            owner: None,
        }
    }

    pub fn with_id(mut self, id: CarId) -> Self {
        self.id = id;
        self
    }

    pub fn with_vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = vin.into();
        self
    }

    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = make.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year_of_manufacture = year;
        self
    }

    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Builds the car
    pub fn build(self) -> Car {
        Car {
            id: self.id,
            vin: self.vin,
            make: self.make,
            model: self.model,
            year_of_manufacture: self.year_of_manufacture,
            owner: self.owner,
        }
    }
}

/// Builder for constructing test policies
pub struct PolicyBuilder {
    id: PolicyId,
    car_id: CarId,
    provider: Option<String>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl PolicyBuilder {
    /// Creates a builder for a policy of `car_id` covering the reference period
    pub fn new(car_id: CarId) -> Self {
        Self {
            id: PolicyId::new_v7(),
            car_id,
            provider: None,
            start_date: DateFixtures::policy_start(),
            end_date: Some(DateFixtures::policy_end()),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets both coverage bounds
    pub fn covering(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = Some(end);
        self
    }

    /// Ends coverage on `end`, keeping the start date
    pub fn ending_on(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Removes the end date, producing a malformed policy
    pub fn open_ended(mut self) -> Self {
        self.end_date = None;
        self
    }

    /// Builds the policy
    pub fn build(self) -> InsurancePolicy {
        InsurancePolicy {
            id: self.id,
            car_id: self.car_id,
            provider: self.provider,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Builder for constructing test claims
pub struct ClaimBuilder {
    car_id: CarId,
    claim_date: NaiveDate,
    description: String,
    amount: Decimal,
}

impl ClaimBuilder {
    pub fn new(car_id: CarId) -> Self {
        Self {
            car_id,
            claim_date: DateFixtures::policy_start(),
            description: "Minor accident".to_string(),
            amount: dec!(1200),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.claim_date = date;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Builds the unsaved claim payload
    pub fn build_new(self) -> NewClaim {
        NewClaim::new(self.car_id, self.claim_date, self.description, self.amount)
    }

    /// Builds a stored claim with a fresh identifier
    pub fn build(self) -> InsuranceClaim {
        InsuranceClaim {
            id: ClaimId::new_v7(),
            car_id: self.car_id,
            claim_date: self.claim_date,
            description: self.description,
            amount: self.amount,
            created_at: Utc::now(),
        }
    }
}
