//! Chronological car history
//!
//! Policies and claims are two differently-shaped timelines. The merger turns
//! each record into a [`HistoryEvent`] and produces one sequence ordered by
//! event date. Policy events are keyed on their start date.
//!
//! Ordering uses a stable sort over the concatenation "policies, then claims",
//! so when a policy and a claim share a date the policy comes first, and
//! same-kind events keep the order the store returned them in.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::CarId;
use crate::claim::InsuranceClaim;
use crate::error::MotorError;
use crate::policy::InsurancePolicy;
use crate::ports::RecordStorePort;

/// One entry of a car's history, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryEvent {
    /// A policy, positioned at its start date
    Policy {
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        provider: Option<String>,
    },
    /// A claim, positioned at its claim date
    Claim {
        claim_date: NaiveDate,
        amount: Decimal,
        description: String,
    },
}

impl HistoryEvent {
    /// The date this event is ordered by
    pub fn date(&self) -> NaiveDate {
        match self {
            HistoryEvent::Policy { start_date, .. } => *start_date,
            HistoryEvent::Claim { claim_date, .. } => *claim_date,
        }
    }

    /// The `type` tag of the event
    pub fn kind(&self) -> &'static str {
        match self {
            HistoryEvent::Policy { .. } => "policy",
            HistoryEvent::Claim { .. } => "claim",
        }
    }

    pub fn is_policy(&self) -> bool {
        matches!(self, HistoryEvent::Policy { .. })
    }

    pub fn is_claim(&self) -> bool {
        matches!(self, HistoryEvent::Claim { .. })
    }
}

impl From<InsurancePolicy> for HistoryEvent {
    fn from(policy: InsurancePolicy) -> Self {
        HistoryEvent::Policy {
            start_date: policy.start_date,
            end_date: policy.end_date,
            provider: policy.provider,
        }
    }
}

impl From<InsuranceClaim> for HistoryEvent {
    fn from(claim: InsuranceClaim) -> Self {
        HistoryEvent::Claim {
            claim_date: claim.claim_date,
            amount: claim.amount,
            description: claim.description,
        }
    }
}

/// Merges policies and claims into one ascending sequence
///
/// The result always holds `policies.len() + claims.len()` events.
pub fn merge_history(
    policies: Vec<InsurancePolicy>,
    claims: Vec<InsuranceClaim>,
) -> Vec<HistoryEvent> {
    let mut events = Vec::with_capacity(policies.len() + claims.len());
    events.extend(policies.into_iter().map(HistoryEvent::from));
    events.extend(claims.into_iter().map(HistoryEvent::from));

    // sort_by_key is stable: ties keep concatenation order
    events.sort_by_key(HistoryEvent::date);
    events
}

/// Builds the chronological history of a car from the record store
#[derive(Clone)]
pub struct HistoryMerger {
    store: Arc<dyn RecordStorePort>,
}

impl HistoryMerger {
    pub fn new(store: Arc<dyn RecordStorePort>) -> Self {
        Self { store }
    }

    /// Returns the car's policy and claim events ordered by date
    ///
    /// The car is assumed to exist. The returned vector is a snapshot and
    /// does not change when the store does.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::Store` if either timeline cannot be read
    pub async fn car_history(&self, car_id: CarId) -> Result<Vec<HistoryEvent>, MotorError> {
        let (policies, claims) = tokio::try_join!(
            self.store.find_policies_by_car_ordered_by_start_date(car_id),
            self.store.find_claims_by_car_ordered_by_claim_date(car_id),
        )?;

        tracing::debug!(
            car_id = %car_id,
            policies = policies.len(),
            claims = claims.len(),
            "Merging car history"
        );
        Ok(merge_history(policies, claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::{ClaimId, PolicyId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_car() -> CarId {
        CarId::from_uuid(uuid::Uuid::nil())
    }

    fn policy(start: NaiveDate, end: NaiveDate, provider: &str) -> InsurancePolicy {
        InsurancePolicy {
            id: PolicyId::new_v7(),
            car_id: test_car(),
            provider: Some(provider.to_string()),
            start_date: start,
            end_date: Some(end),
        }
    }

    fn claim(on: NaiveDate, description: &str) -> InsuranceClaim {
        InsuranceClaim {
            id: ClaimId::new_v7(),
            car_id: test_car(),
            claim_date: on,
            description: description.to_string(),
            amount: dec!(250.50),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_policy_precedes_claim_on_same_date() {
        let events = merge_history(
            vec![policy(date(2025, 1, 5), date(2025, 12, 31), "Allianz")],
            vec![claim(date(2025, 1, 5), "Parking scrape")],
        );

        assert_eq!(events.len(), 2);
        assert!(events[0].is_policy());
        assert!(events[1].is_claim());
    }

    #[test]
    fn test_interleaves_by_date() {
        let events = merge_history(
            vec![
                policy(date(2023, 1, 1), date(2023, 12, 31), "A"),
                policy(date(2024, 1, 1), date(2024, 12, 31), "B"),
            ],
            vec![claim(date(2023, 6, 1), "first"), claim(date(2024, 6, 1), "second")],
        );

        let kinds: Vec<_> = events.iter().map(HistoryEvent::kind).collect();
        assert_eq!(kinds, vec!["policy", "claim", "policy", "claim"]);
        assert!(events.windows(2).all(|w| w[0].date() <= w[1].date()));
    }

    #[test]
    fn test_claim_before_any_policy() {
        let events = merge_history(
            vec![policy(date(2024, 1, 1), date(2024, 12, 31), "A")],
            vec![claim(date(2023, 12, 31), "early")],
        );
        assert!(events[0].is_claim());
    }

    #[test]
    fn test_same_kind_ties_keep_store_order() {
        let events = merge_history(
            vec![],
            vec![claim(date(2025, 2, 2), "first"), claim(date(2025, 2, 2), "second")],
        );

        let descriptions: Vec<_> = events
            .iter()
            .map(|e| match e {
                HistoryEvent::Claim { description, .. } => description.as_str(),
                HistoryEvent::Policy { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(descriptions, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_history() {
        assert!(merge_history(vec![], vec![]).is_empty());
    }

    #[test]
    fn test_policy_event_carries_payload() {
        let events = merge_history(vec![policy(date(2024, 6, 1), date(2025, 6, 1), "Generali")], vec![]);
        assert_eq!(
            events[0],
            HistoryEvent::Policy {
                start_date: date(2024, 6, 1),
                end_date: Some(date(2025, 6, 1)),
                provider: Some("Generali".to_string()),
            }
        );
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let events = merge_history(
            vec![policy(date(2024, 6, 1), date(2025, 6, 1), "Generali")],
            vec![claim(date(2024, 7, 1), "Hail")],
        );
        let json = serde_json::to_value(&events).unwrap();

        assert_eq!(json[0]["type"], "policy");
        assert_eq!(json[0]["start_date"], "2024-06-01");
        assert_eq!(json[1]["type"], "claim");
        assert_eq!(json[1]["description"], "Hail");
    }
}
