//! Record Store Port
//!
//! This module defines the port trait through which the motor domain reads
//! cars, policies and claims. The domain never talks to a database directly;
//! it depends on this trait and an adapter supplies the implementation.
//!
//! # Implementations
//!
//! - **PostgresRecordStore** (`infra_db`): production adapter over PostgreSQL
//! - **MockRecordStore** (this module, `mock` feature): in-memory adapter
//!
//! # Ordering contracts
//!
//! The `*_ordered_by_*` lookups must return records sorted ascending by the
//! named date. Records sharing a date keep a stable order between calls.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{CarId, ClaimId, DomainPort, HealthCheckable, PortError};

use crate::car::Car;
use crate::claim::{InsuranceClaim, NewClaim};
use crate::policy::InsurancePolicy;

/// The port trait for the record store
///
/// All methods are async and return `Result<T, PortError>` so the database
/// adapter and the in-memory adapter fail the same way.
#[async_trait]
pub trait RecordStorePort: DomainPort + HealthCheckable {
    /// Retrieves a car by ID, or `None` if it does not exist
    async fn find_car_by_id(&self, car_id: CarId) -> Result<Option<Car>, PortError>;

    /// Lists every car
    async fn list_cars(&self) -> Result<Vec<Car>, PortError>;

    /// All policies of a car, in no particular order
    async fn find_policies_covering_car(
        &self,
        car_id: CarId,
    ) -> Result<Vec<InsurancePolicy>, PortError>;

    /// Policies whose end date equals `date` exactly
    async fn find_policies_by_end_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<InsurancePolicy>, PortError>;

    /// Policies of a car sorted by start date ascending
    async fn find_policies_by_car_ordered_by_start_date(
        &self,
        car_id: CarId,
    ) -> Result<Vec<InsurancePolicy>, PortError>;

    /// Claims of a car sorted by claim date ascending
    async fn find_claims_by_car_ordered_by_claim_date(
        &self,
        car_id: CarId,
    ) -> Result<Vec<InsuranceClaim>, PortError>;

    /// Retrieves one claim of a car
    ///
    /// Returns `None` when the claim does not exist or belongs to another car.
    async fn find_claim(
        &self,
        car_id: CarId,
        claim_id: ClaimId,
    ) -> Result<Option<InsuranceClaim>, PortError>;

    /// Stores a new claim and returns it with its generated identifier
    async fn save_claim(&self, claim: NewClaim) -> Result<InsuranceClaim, PortError>;
}

/// Mock implementation of RecordStorePort for testing
///
/// This adapter keeps records in memory and is useful for unit testing
/// without a database.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory mock implementation of RecordStorePort
    ///
    /// Besides storing records it can simulate an outage and counts the
    /// lookups it served, so tests can assert that no query happened.
    #[derive(Debug, Default)]
    pub struct MockRecordStore {
        cars: Arc<RwLock<HashMap<CarId, Car>>>,
        policies: Arc<RwLock<Vec<InsurancePolicy>>>,
        claims: Arc<RwLock<Vec<InsuranceClaim>>>,
        unavailable: AtomicBool,
        queries: AtomicUsize,
    }

    impl MockRecordStore {
        /// Creates a new empty store
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn insert_car(&self, car: Car) {
            self.cars.write().await.insert(car.id, car);
        }

        pub async fn insert_policy(&self, policy: InsurancePolicy) {
            self.policies.write().await.push(policy);
        }

        pub async fn insert_claim(&self, claim: InsuranceClaim) {
            self.claims.write().await.push(claim);
        }

        /// Pre-populates a store with records
        pub async fn with_records(
            cars: Vec<Car>,
            policies: Vec<InsurancePolicy>,
            claims: Vec<InsuranceClaim>,
        ) -> Self {
            let store = Self::new();
            for car in cars {
                store.insert_car(car).await;
            }
            store.policies.write().await.extend(policies);
            store.claims.write().await.extend(claims);
            store
        }

        /// Makes every subsequent call fail with `ServiceUnavailable`
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Number of store calls served or refused so far
        pub fn query_count(&self) -> usize {
            self.queries.load(Ordering::SeqCst)
        }

        fn begin_query(&self) -> Result<(), PortError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::ServiceUnavailable {
                    service: "mock-record-store".to_string(),
                });
            }
            Ok(())
        }
    }

    impl DomainPort for MockRecordStore {}

    #[async_trait]
    impl HealthCheckable for MockRecordStore {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.unavailable.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult {
                adapter_id: "mock-record-store".to_string(),
                status,
                latency_ms: 0,
                message: Some("In-memory record store".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl RecordStorePort for MockRecordStore {
        async fn find_car_by_id(&self, car_id: CarId) -> Result<Option<Car>, PortError> {
            self.begin_query()?;
            Ok(self.cars.read().await.get(&car_id).cloned())
        }

        async fn list_cars(&self) -> Result<Vec<Car>, PortError> {
            self.begin_query()?;
            let mut cars: Vec<Car> = self.cars.read().await.values().cloned().collect();
            cars.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(cars)
        }

        async fn find_policies_covering_car(
            &self,
            car_id: CarId,
        ) -> Result<Vec<InsurancePolicy>, PortError> {
            self.begin_query()?;
            Ok(self
                .policies
                .read()
                .await
                .iter()
                .filter(|p| p.car_id == car_id)
                .cloned()
                .collect())
        }

        async fn find_policies_by_end_date(
            &self,
            date: NaiveDate,
        ) -> Result<Vec<InsurancePolicy>, PortError> {
            self.begin_query()?;
            Ok(self
                .policies
                .read()
                .await
                .iter()
                .filter(|p| p.expires_on(date))
                .cloned()
                .collect())
        }

        async fn find_policies_by_car_ordered_by_start_date(
            &self,
            car_id: CarId,
        ) -> Result<Vec<InsurancePolicy>, PortError> {
            let mut policies = self.find_policies_covering_car(car_id).await?;
            policies.sort_by_key(|p| p.start_date);
            Ok(policies)
        }

        async fn find_claims_by_car_ordered_by_claim_date(
            &self,
            car_id: CarId,
        ) -> Result<Vec<InsuranceClaim>, PortError> {
            self.begin_query()?;
            let mut claims: Vec<InsuranceClaim> = self
                .claims
                .read()
                .await
                .iter()
                .filter(|c| c.car_id == car_id)
                .cloned()
                .collect();
            claims.sort_by_key(|c| c.claim_date);
            Ok(claims)
        }

        async fn find_claim(
            &self,
            car_id: CarId,
            claim_id: ClaimId,
        ) -> Result<Option<InsuranceClaim>, PortError> {
            self.begin_query()?;
            Ok(self
                .claims
                .read()
                .await
                .iter()
                .find(|c| c.id == claim_id && c.car_id == car_id)
                .cloned())
        }

        async fn save_claim(&self, claim: NewClaim) -> Result<InsuranceClaim, PortError> {
            self.begin_query()?;
            if !self.cars.read().await.contains_key(&claim.car_id) {
                return Err(PortError::not_found("Car", claim.car_id));
            }
            let saved = claim
                .into_claim()
                .map_err(|e| PortError::validation(e.to_string()))?;
            self.claims.write().await.push(saved.clone());
            Ok(saved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockRecordStore;
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_mock_find_car() {
        let car = Car::new("VIN12345", "Dacia", "Logan", 2018);
        let store = MockRecordStore::with_records(vec![car.clone()], vec![], vec![]).await;

        assert_eq!(store.find_car_by_id(car.id).await.unwrap(), Some(car));
        assert_eq!(store.find_car_by_id(CarId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mock_orders_policies_by_start_date() {
        let car = Car::new("VIN12345", "Dacia", "Logan", 2018);
        let late = InsurancePolicy::new(car.id, None, date(2025, 1, 1), date(2025, 12, 31)).unwrap();
        let early = InsurancePolicy::new(car.id, None, date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let store = MockRecordStore::with_records(vec![car.clone()], vec![late.clone(), early.clone()], vec![]).await;

        let ordered = store.find_policies_by_car_ordered_by_start_date(car.id).await.unwrap();
        assert_eq!(ordered, vec![early, late]);
    }

    #[tokio::test]
    async fn test_mock_end_date_is_exact_match() {
        let car = Car::new("VIN12345", "Dacia", "Logan", 2018);
        let policy = InsurancePolicy::new(car.id, None, date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let store = MockRecordStore::with_records(vec![car], vec![policy.clone()], vec![]).await;

        assert_eq!(store.find_policies_by_end_date(date(2024, 12, 31)).await.unwrap(), vec![policy]);
        assert!(store.find_policies_by_end_date(date(2025, 1, 1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_save_claim_requires_car() {
        let store = MockRecordStore::new();
        let claim = NewClaim::new(CarId::new(), date(2025, 1, 1), "Dent", dec!(100));

        let err = store.save_claim(claim).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_find_claim_checks_owner_car() {
        let car = Car::new("VIN12345", "Dacia", "Logan", 2018);
        let store = MockRecordStore::with_records(vec![car.clone()], vec![], vec![]).await;
        let saved = store
            .save_claim(NewClaim::new(car.id, date(2025, 1, 1), "Dent", dec!(100)))
            .await
            .unwrap();

        assert_eq!(store.find_claim(car.id, saved.id).await.unwrap(), Some(saved.clone()));
        assert_eq!(store.find_claim(CarId::new(), saved.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mock_unavailable() {
        let store = MockRecordStore::new();
        store.set_unavailable(true);

        let err = store.list_cars().await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(store.query_count(), 1);

        let health = store.health_check().await;
        assert!(!health.is_operational());
    }
}
