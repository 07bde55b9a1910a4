//! PostgreSQL Record Store Adapter
//!
//! This module provides the internal (database) adapter for the motor domain,
//! implementing the `RecordStorePort` trait on top of the car, policy and
//! claim repositories.
//!
//! # Overview
//!
//! The `PostgresRecordStore` serves as the bridge between the domain layer's
//! port interface and the database layer. It:
//!
//! - Translates domain requests into repository operations
//! - Converts database row types back to domain models
//! - Handles error translation between database and port errors
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresRecordStore;
//! use domain_motor::RecordStorePort;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn RecordStorePort> = Arc::new(PostgresRecordStore::new(pool));
//! let car = store.find_car_by_id(car_id).await?;
//! ```

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, CarId, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, OwnerId,
    PolicyId, PortError,
};
use domain_motor::{Car, InsuranceClaim, InsurancePolicy, NewClaim, Owner, RecordStorePort};

use crate::error::DatabaseError;
use crate::repositories::{
    CarRepository, CarRow, ClaimRow, ClaimsRepository, NewCar, NewClaimRow, NewOwner, NewPolicy,
    PolicyRepository, PolicyRow,
};

const ADAPTER_ID: &str = "postgres-record-store";

/// PostgreSQL-backed implementation of the RecordStorePort trait
///
/// # Health Checking
///
/// Health checks run `SELECT 1` against the pool to confirm the database
/// is reachable.
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants; connection
/// problems become transient errors so callers can retry.
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    cars: CarRepository,
    policies: PolicyRepository,
    claims: ClaimsRepository,
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Creates a new PostgreSQL record store
    pub fn new(pool: PgPool) -> Self {
        Self {
            cars: CarRepository::new(pool.clone()),
            policies: PolicyRepository::new(pool.clone()),
            claims: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Stores a car together with its owner, if any
    ///
    /// Cars are not created through the port; this is used for seeding.
    #[instrument(skip(self, car), fields(car_id = %car.id))]
    pub async fn insert_car(&self, car: &Car) -> Result<(), PortError> {
        if let Some(owner) = &car.owner {
            self.cars
                .insert_owner(NewOwner {
                    owner_id: owner.id.into(),
                    name: owner.name.clone(),
                    email: owner.email.clone(),
                })
                .await?;
        }

        self.cars
            .insert(NewCar {
                car_id: car.id.into(),
                vin: car.vin.clone(),
                make: car.make.clone(),
                model: car.model.clone(),
                year_of_manufacture: car.year_of_manufacture,
                owner_id: car.owner.as_ref().map(|o| o.id.into()),
            })
            .await?;
        Ok(())
    }

    /// Stores a policy
    ///
    /// Policies are not created through the port; this is used for seeding.
    #[instrument(skip(self, policy), fields(policy_id = %policy.id))]
    pub async fn insert_policy(&self, policy: &InsurancePolicy) -> Result<(), PortError> {
        self.policies
            .insert(NewPolicy {
                policy_id: policy.id.into(),
                car_id: policy.car_id.into(),
                provider: policy.provider.clone(),
                start_date: policy.start_date,
                end_date: policy.end_date,
            })
            .await?;
        Ok(())
    }
}

impl DomainPort for PostgresRecordStore {}

#[async_trait]
impl HealthCheckable for PostgresRecordStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl RecordStorePort for PostgresRecordStore {
    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn find_car_by_id(&self, car_id: CarId) -> Result<Option<Car>, PortError> {
        debug!("Fetching car by ID");
        let row = self.cars.find_by_id(car_id.into()).await?;
        Ok(row.map(row_to_car))
    }

    #[instrument(skip(self))]
    async fn list_cars(&self) -> Result<Vec<Car>, PortError> {
        let rows = self.cars.list_all().await?;
        debug!(count = rows.len(), "Listed cars");
        Ok(rows.into_iter().map(row_to_car).collect())
    }

    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn find_policies_covering_car(
        &self,
        car_id: CarId,
    ) -> Result<Vec<InsurancePolicy>, PortError> {
        let rows = self.policies.find_by_car(car_id.into()).await?;
        Ok(rows.into_iter().map(row_to_policy).collect())
    }

    #[instrument(skip(self), fields(end_date = %date))]
    async fn find_policies_by_end_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<InsurancePolicy>, PortError> {
        let rows = self.policies.find_by_end_date(date).await?;
        debug!(count = rows.len(), "Found policies ending on date");
        Ok(rows.into_iter().map(row_to_policy).collect())
    }

    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn find_policies_by_car_ordered_by_start_date(
        &self,
        car_id: CarId,
    ) -> Result<Vec<InsurancePolicy>, PortError> {
        let rows = self.policies.find_by_car_ordered(car_id.into()).await?;
        Ok(rows.into_iter().map(row_to_policy).collect())
    }

    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn find_claims_by_car_ordered_by_claim_date(
        &self,
        car_id: CarId,
    ) -> Result<Vec<InsuranceClaim>, PortError> {
        let rows = self.claims.find_by_car_ordered(car_id.into()).await?;
        Ok(rows.into_iter().map(row_to_claim).collect())
    }

    #[instrument(skip(self), fields(car_id = %car_id, claim_id = %claim_id))]
    async fn find_claim(
        &self,
        car_id: CarId,
        claim_id: ClaimId,
    ) -> Result<Option<InsuranceClaim>, PortError> {
        let row = self.claims.find_for_car(car_id.into(), claim_id.into()).await?;
        Ok(row.map(row_to_claim))
    }

    #[instrument(skip(self, claim), fields(car_id = %claim.car_id))]
    async fn save_claim(&self, claim: NewClaim) -> Result<InsuranceClaim, PortError> {
        let car_id = claim.car_id;
        let claim = claim
            .into_claim()
            .map_err(|e| PortError::validation(e.to_string()))?;

        let row = self
            .claims
            .insert(NewClaimRow {
                claim_id: claim.id.into(),
                car_id: claim.car_id.into(),
                claim_date: claim.claim_date,
                description: claim.description,
                amount: claim.amount,
                created_at: claim.created_at,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::ForeignKeyViolation(_) => PortError::not_found("Car", car_id),
                other => PortError::from(other),
            })?;

        debug!(claim_id = %row.claim_id, "Stored claim");
        Ok(row_to_claim(row))
    }
}

// ============================================================================
// Row conversions
// ============================================================================

fn row_to_car(row: CarRow) -> Car {
    let owner = match (row.owner_id, row.owner_name) {
        (Some(id), Some(name)) => Some(Owner {
            id: OwnerId::from_uuid(id),
            name,
            email: row.owner_email,
        }),
        _ => None,
    };

    Car {
        id: CarId::from_uuid(row.car_id),
        vin: row.vin,
        make: row.make,
        model: row.model,
        year_of_manufacture: row.year_of_manufacture,
        owner,
    }
}

fn row_to_policy(row: PolicyRow) -> InsurancePolicy {
    InsurancePolicy {
        id: PolicyId::from_uuid(row.policy_id),
        car_id: CarId::from_uuid(row.car_id),
        provider: row.provider,
        start_date: row.start_date,
        end_date: row.end_date,
    }
}

fn row_to_claim(row: ClaimRow) -> InsuranceClaim {
    InsuranceClaim {
        id: ClaimId::from_uuid(row.claim_id),
        car_id: CarId::from_uuid(row.car_id),
        claim_date: row.claim_date,
        description: row.description,
        amount: row.amount,
        created_at: row.created_at,
    }
}
