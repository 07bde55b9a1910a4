//! Insurance policy repository implementation
//!
//! Ordered lookups add `policy_id` as a tie-breaker so policies sharing a
//! start date come back in the same order on every call.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for managing insurance policy data
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    /// Creates a new PolicyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves every policy of a car
    pub async fn find_by_car(&self, car_id: Uuid) -> Result<Vec<PolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT policy_id, car_id, provider, start_date, end_date
            FROM insurance_policies
            WHERE car_id = $1
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves the policies of a car ordered by start date ascending
    pub async fn find_by_car_ordered(&self, car_id: Uuid) -> Result<Vec<PolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT policy_id, car_id, provider, start_date, end_date
            FROM insurance_policies
            WHERE car_id = $1
            ORDER BY start_date ASC, policy_id ASC
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves every policy whose end date is exactly `end_date`
    pub async fn find_by_end_date(&self, end_date: NaiveDate) -> Result<Vec<PolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT policy_id, car_id, provider, start_date, end_date
            FROM insurance_policies
            WHERE end_date = $1
            ORDER BY policy_id ASC
            "#,
        )
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a policy
    ///
    /// # Errors
    ///
    /// `DatabaseError::ConstraintViolation` if the end date precedes the start date
    pub async fn insert(&self, policy: NewPolicy) -> Result<PolicyRow, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>(
            r#"
            INSERT INTO insurance_policies (policy_id, car_id, provider, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING policy_id, car_id, provider, start_date, end_date
            "#,
        )
        .bind(policy.policy_id)
        .bind(policy.car_id)
        .bind(&policy.provider)
        .bind(policy.start_date)
        .bind(policy.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Database row for an insurance policy
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PolicyRow {
    pub policy_id: Uuid,
    pub car_id: Uuid,
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Data for creating a new policy
#[derive(Debug, Clone)]
pub struct NewPolicy {
    pub policy_id: Uuid,
    pub car_id: Uuid,
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
