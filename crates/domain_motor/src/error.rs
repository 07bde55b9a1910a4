//! Motor domain errors

use thiserror::Error;

use chrono::NaiveDate;
use core_kernel::{CarId, ClaimId, PolicyId, PortError};

/// Errors that can occur in the motor insurance domain
#[derive(Debug, Error)]
pub enum MotorError {
    #[error("Car not found: {0}")]
    CarNotFound(CarId),

    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    /// Every policy must carry an end date; its absence is a data problem
    #[error("Policy {0} has no end date")]
    MissingEndDate(PolicyId),

    #[error("Policy {policy_id} ends on {end} before it starts on {start}")]
    EndBeforeStart {
        policy_id: PolicyId,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid claim: {0}")]
    InvalidClaim(String),

    #[error("Record store error: {0}")]
    Store(#[from] PortError),
}

impl MotorError {
    /// Returns true for stored records that break the policy invariants
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            MotorError::MissingEndDate(_) | MotorError::EndBeforeStart { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            MotorError::CarNotFound(_) | MotorError::ClaimNotFound(_) => true,
            MotorError::Store(e) => e.is_not_found(),
            _ => false,
        }
    }
}
