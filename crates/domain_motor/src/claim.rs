//! Insurance claims filed against a car

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, ClaimId};
use crate::error::MotorError;

/// A recorded insurance claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceClaim {
    pub id: ClaimId,
    pub car_id: CarId,
    /// Date the insured event happened
    pub claim_date: NaiveDate,
    pub description: String,
    /// Claimed amount, never negative
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A claim that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClaim {
    pub car_id: CarId,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl NewClaim {
    pub fn new(
        car_id: CarId,
        claim_date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            car_id,
            claim_date,
            description: description.into(),
            amount,
        }
    }

    /// Checks the claim payload
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidClaim` if the description is blank or the
    /// amount is negative
    pub fn validate(&self) -> Result<(), MotorError> {
        if self.description.trim().is_empty() {
            return Err(MotorError::InvalidClaim("description must not be blank".to_string()));
        }
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(MotorError::InvalidClaim(format!(
                "amount must be non-negative, got {}",
                self.amount
            )));
        }
        Ok(())
    }

    /// Validates the payload and assigns an identifier
    pub fn into_claim(self) -> Result<InsuranceClaim, MotorError> {
        self.validate()?;
        Ok(InsuranceClaim {
            id: ClaimId::new_v7(),
            car_id: self.car_id,
            claim_date: self.claim_date,
            description: self.description.trim().to_string(),
            amount: self.amount,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_claim(description: &str, amount: Decimal) -> NewClaim {
        NewClaim::new(
            CarId::new_v7(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            description,
            amount,
        )
    }

    #[test]
    fn test_valid_claim() {
        let claim = new_claim("Minor accident", dec!(1200)).into_claim().unwrap();
        assert_eq!(claim.amount, dec!(1200));
        assert_eq!(claim.description, "Minor accident");
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        assert!(new_claim("Windscreen chip", dec!(0)).validate().is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = new_claim("Invalid amount", dec!(-50)).validate().unwrap_err();
        assert!(matches!(err, MotorError::InvalidClaim(_)));
    }

    #[test]
    fn test_blank_description_rejected() {
        assert!(new_claim("   ", dec!(10)).validate().is_err());
        assert!(new_claim("", dec!(10)).validate().is_err());
    }
}
