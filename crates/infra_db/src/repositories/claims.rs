//! Claims repository implementation
//!
//! This module provides database access for insurance claims filed
//! against a car.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for managing claims data
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves one claim, scoped to the car it was filed against
    ///
    /// # Returns
    ///
    /// The claim, or `None` if it does not exist or belongs to another car
    pub async fn find_for_car(
        &self,
        car_id: Uuid,
        claim_id: Uuid,
    ) -> Result<Option<ClaimRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT claim_id, car_id, claim_date, description, amount, created_at
            FROM insurance_claims
            WHERE claim_id = $1 AND car_id = $2
            "#,
        )
        .bind(claim_id)
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves the claims of a car ordered by claim date ascending
    ///
    /// Claims on the same date keep insertion order.
    pub async fn find_by_car_ordered(&self, car_id: Uuid) -> Result<Vec<ClaimRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT claim_id, car_id, claim_date, description, amount, created_at
            FROM insurance_claims
            WHERE car_id = $1
            ORDER BY claim_date ASC, created_at ASC, claim_id ASC
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Creates a new claim
    ///
    /// # Arguments
    ///
    /// * `claim` - The claim data to insert
    ///
    /// # Returns
    ///
    /// The stored claim as read back from the database
    pub async fn insert(&self, claim: NewClaimRow) -> Result<ClaimRow, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            INSERT INTO insurance_claims (
                claim_id, car_id, claim_date, description, amount, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING claim_id, car_id, claim_date, description, amount, created_at
            "#,
        )
        .bind(claim.claim_id)
        .bind(claim.car_id)
        .bind(claim.claim_date)
        .bind(&claim.description)
        .bind(claim.amount)
        .bind(claim.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Database row for an insurance claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub car_id: Uuid,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new claim
#[derive(Debug, Clone)]
pub struct NewClaimRow {
    pub claim_id: Uuid,
    pub car_id: Uuid,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}
