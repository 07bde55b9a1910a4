//! Insurance policy and its coverage window

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, DateRange, PolicyId};
use crate::error::MotorError;

/// An insurance policy covering one car
///
/// `end_date` is optional only because stored data can be incomplete.
/// A policy without an end date is invalid for this domain and never
/// counts as coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub id: PolicyId,
    pub car_id: CarId,
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl InsurancePolicy {
    /// Creates a bounded policy, rejecting an end date before the start date
    pub fn new(
        car_id: CarId,
        provider: Option<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, MotorError> {
        let policy = Self {
            id: PolicyId::new_v7(),
            car_id,
            provider,
            start_date,
            end_date: Some(end_date),
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Returns the inclusive coverage window of this policy
    ///
    /// # Errors
    ///
    /// * `MotorError::MissingEndDate` if the policy has no end date
    /// * `MotorError::EndBeforeStart` if the end date precedes the start date
    pub fn coverage(&self) -> Result<DateRange, MotorError> {
        let end = self.end_date.ok_or(MotorError::MissingEndDate(self.id))?;

        DateRange::new(self.start_date, end).map_err(|_| MotorError::EndBeforeStart {
            policy_id: self.id,
            start: self.start_date,
            end,
        })
    }

    /// Checks the stored record against the policy invariants
    pub fn validate(&self) -> Result<(), MotorError> {
        self.coverage().map(|_| ())
    }

    /// Returns true if the policy covers the given date
    ///
    /// Invalid policies cover nothing.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.coverage().map_or(false, |range| range.contains(date))
    }

    /// Returns true if coverage ends on exactly this date
    pub fn expires_on(&self, date: NaiveDate) -> bool {
        self.end_date == Some(date)
    }
}
