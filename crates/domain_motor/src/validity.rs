//! Insurance validity on a given date
//!
//! A car is insured on a date iff at least one of its policies has a
//! coverage window `[start_date, end_date]` containing that date. Both
//! bounds are inclusive and overlapping policies are fine: existence is
//! what counts, not uniqueness.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use core_kernel::CarId;
use crate::error::MotorError;
use crate::policy::InsurancePolicy;
use crate::ports::RecordStorePort;

/// Answers "is this car insured on date D?"
///
/// The evaluator assumes the car exists; checking that is the caller's job.
/// It performs no writes.
#[derive(Clone)]
pub struct ValidityEvaluator {
    store: Arc<dyn RecordStorePort>,
}

impl ValidityEvaluator {
    pub fn new(store: Arc<dyn RecordStorePort>) -> Self {
        Self { store }
    }

    /// Returns true if some policy of the car covers `date`
    ///
    /// # Errors
    ///
    /// Returns `MotorError::Store` if the policies cannot be read
    pub async fn is_insurance_valid(
        &self,
        car_id: CarId,
        date: NaiveDate,
    ) -> Result<bool, MotorError> {
        let policies = self.store.find_policies_covering_car(car_id).await?;
        let valid = covers(&policies, date);

        debug!(car_id = %car_id, %date, policies = policies.len(), valid, "Evaluated insurance validity");
        Ok(valid)
    }
}

/// Returns true if any of the policies covers `date`
///
/// Policies breaking the invariants (no end date, end before start) never
/// grant coverage. Each one encountered is reported as a data-integrity
/// warning so it can be fixed upstream.
pub fn covers(policies: &[InsurancePolicy], date: NaiveDate) -> bool {
    for policy in policies {
        match policy.coverage() {
            Ok(range) if range.contains(date) => return true,
            Ok(_) => {}
            Err(e) => {
                warn!(
                    policy_id = %policy.id,
                    car_id = %policy.car_id,
                    error = %e,
                    "Data integrity: policy ignored for validity check"
                );
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car::Car;
    use crate::ports::mock::MockRecordStore;
    use core_kernel::PolicyId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn evaluator_with(policies: Vec<(NaiveDate, Option<NaiveDate>)>) -> (ValidityEvaluator, CarId, Arc<MockRecordStore>) {
        let car = Car::new("WVWZZZ1JZXW000001", "Volkswagen", "Golf", 2019);
        let car_id = car.id;
        let policies = policies
            .into_iter()
            .map(|(start, end)| InsurancePolicy {
                id: PolicyId::new_v7(),
                car_id,
                provider: Some("Groupama".to_string()),
                start_date: start,
                end_date: end,
            })
            .collect();
        let store = Arc::new(MockRecordStore::with_records(vec![car], policies, vec![]).await);
        (ValidityEvaluator::new(store.clone()), car_id, store)
    }

    #[tokio::test]
    async fn test_no_policies_is_not_valid() {
        let (evaluator, car_id, _) = evaluator_with(vec![]).await;
        assert!(!evaluator.is_insurance_valid(car_id, date(2025, 1, 1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_boundaries_inclusive() {
        let (evaluator, car_id, _) =
            evaluator_with(vec![(date(2024, 6, 1), Some(date(2025, 6, 1)))]).await;

        assert!(evaluator.is_insurance_valid(car_id, date(2024, 6, 1)).await.unwrap());
        assert!(evaluator.is_insurance_valid(car_id, date(2025, 6, 1)).await.unwrap());
        assert!(!evaluator.is_insurance_valid(car_id, date(2024, 5, 31)).await.unwrap());
        assert!(!evaluator.is_insurance_valid(car_id, date(2025, 6, 2)).await.unwrap());
    }

    #[tokio::test]
    async fn test_gap_between_policies() {
        let (evaluator, car_id, _) = evaluator_with(vec![
            (date(2024, 1, 1), Some(date(2024, 6, 30))),
            (date(2024, 7, 2), Some(date(2024, 12, 31))),
        ])
        .await;

        assert!(evaluator.is_insurance_valid(car_id, date(2024, 6, 30)).await.unwrap());
        assert!(!evaluator.is_insurance_valid(car_id, date(2024, 7, 1)).await.unwrap());
        assert!(evaluator.is_insurance_valid(car_id, date(2024, 7, 2)).await.unwrap());
    }

    #[tokio::test]
    async fn test_overlapping_policies() {
        let (evaluator, car_id, _) = evaluator_with(vec![
            (date(2024, 1, 1), Some(date(2024, 12, 31))),
            (date(2024, 6, 1), Some(date(2025, 5, 31))),
        ])
        .await;

        assert!(evaluator.is_insurance_valid(car_id, date(2024, 8, 15)).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_end_date_never_valid() {
        let (evaluator, car_id, _) = evaluator_with(vec![(date(2020, 1, 1), None)]).await;

        assert!(!evaluator.is_insurance_valid(car_id, date(2020, 1, 1)).await.unwrap());
        assert!(!evaluator.is_insurance_valid(car_id, date(2026, 1, 1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_bad_policy_does_not_hide_good_one() {
        let (evaluator, car_id, _) = evaluator_with(vec![
            (date(2020, 1, 1), None),
            (date(2025, 1, 1), Some(date(2025, 12, 31))),
        ])
        .await;

        assert!(evaluator.is_insurance_valid(car_id, date(2025, 3, 3)).await.unwrap());
    }

    #[tokio::test]
    async fn test_other_cars_policies_ignored() {
        let (evaluator, _, store) =
            evaluator_with(vec![(date(2024, 1, 1), Some(date(2024, 12, 31)))]).await;
        let other = Car::new("VF1RFB00000000001", "Renault", "Clio", 2021);
        let other_id = other.id;
        store.insert_car(other).await;

        assert!(!evaluator.is_insurance_valid(other_id, date(2024, 5, 5)).await.unwrap());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let (evaluator, car_id, store) = evaluator_with(vec![]).await;
        store.set_unavailable(true);

        let err = evaluator.is_insurance_valid(car_id, date(2025, 1, 1)).await.unwrap_err();
        assert!(matches!(err, MotorError::Store(_)));
    }
}
