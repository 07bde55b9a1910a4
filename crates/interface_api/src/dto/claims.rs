//! Claims DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use core_kernel::CarId;
use domain_motor::{InsuranceClaim, NewClaim};

/// Body of `POST /api/cars/:car_id/claims`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    pub claim_date: NaiveDate,
    #[validate(
        length(max = 1000, message = "must be at most 1000 characters"),
        custom(function = "not_blank")
    )]
    pub description: String,
    #[validate(custom(function = "storable_amount"))]
    pub amount: Decimal,
}

impl CreateClaimRequest {
    pub fn into_new_claim(self, car_id: CarId) -> NewClaim {
        NewClaim::new(car_id, self.claim_date, self.description, self.amount)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Largest amount the `NUMERIC(14, 2)` claim column holds
const MAX_CLAIM_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

fn storable_amount(value: &Decimal) -> Result<(), ValidationError> {
    let (code, message) = if value.is_sign_negative() && !value.is_zero() {
        ("negative", "must be greater than or equal to 0")
    } else if *value > MAX_CLAIM_AMOUNT {
        ("too_large", "must be at most 999999999999.99")
    } else if value.normalize().scale() > 2 {
        ("precision", "must have at most 2 decimal places")
    } else {
        return Ok(());
    };

    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    Err(err)
}

/// A stored claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: Uuid,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl From<InsuranceClaim> for ClaimResponse {
    fn from(claim: InsuranceClaim) -> Self {
        Self {
            id: *claim.id.as_uuid(),
            claim_date: claim.claim_date,
            description: claim.description,
            amount: claim.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(description: &str, amount: Decimal) -> CreateClaimRequest {
        CreateClaimRequest {
            claim_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            description: description.to_string(),
            amount,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("Minor accident", dec!(1200)).validate().is_ok());
        assert!(request("Free tow", dec!(0)).validate().is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let errors = request("Invalid amount", dec!(-50)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn test_amount_must_fit_claim_column() {
        assert_eq!(MAX_CLAIM_AMOUNT, dec!(999999999999.99));
        assert!(request("Total loss", dec!(999999999999.99)).validate().is_ok());
        assert!(request("Trailing zero", dec!(12.340)).validate().is_ok());

        for amount in [dec!(1000000000000), dec!(12.345)] {
            let errors = request("Unstorable", amount).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("amount"), "amount {amount}");
        }
    }

    #[test]
    fn test_blank_description_rejected() {
        let errors = request("   ", dec!(10)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_deserializes_camel_case() {
        let parsed: CreateClaimRequest = serde_json::from_str(
            r#"{"claimDate":"2025-03-01","description":"Hail","amount":250.5}"#,
        )
        .unwrap();
        assert_eq!(parsed.amount, dec!(250.5));
    }

    #[test]
    fn test_missing_date_fails_to_deserialize() {
        let parsed = serde_json::from_str::<CreateClaimRequest>(
            r#"{"description":"Missing date","amount":1200}"#,
        );
        assert!(parsed.is_err());
    }
}
