//! Car repository implementation
//!
//! This module provides database access for cars and their owners.
//! Owners are joined in on read; a car without an owner is allowed.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const SELECT_CAR_WITH_OWNER: &str = r#"
    SELECT
        c.car_id,
        c.vin,
        c.make,
        c.model,
        c.year_of_manufacture,
        o.owner_id,
        o.name AS owner_name,
        o.email AS owner_email
    FROM cars c
    LEFT JOIN owners o ON o.owner_id = c.owner_id
"#;

/// Repository for managing car data
#[derive(Debug, Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    /// Creates a new CarRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a car by its identifier
    ///
    /// # Returns
    ///
    /// The car with its owner, or `None` if no such car exists
    pub async fn find_by_id(&self, car_id: Uuid) -> Result<Option<CarRow>, DatabaseError> {
        let query = format!("{SELECT_CAR_WITH_OWNER} WHERE c.car_id = $1");
        let row = sqlx::query_as::<_, CarRow>(&query)
            .bind(car_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Lists every car ordered by identifier
    pub async fn list_all(&self) -> Result<Vec<CarRow>, DatabaseError> {
        let query = format!("{SELECT_CAR_WITH_OWNER} ORDER BY c.car_id");
        let rows = sqlx::query_as::<_, CarRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Inserts an owner, refreshing name and email if it already exists
    pub async fn insert_owner(&self, owner: NewOwner) -> Result<Uuid, DatabaseError> {
        let owner_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO owners (owner_id, name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (owner_id) DO UPDATE
                SET name = EXCLUDED.name, email = EXCLUDED.email
            RETURNING owner_id
            "#,
        )
        .bind(owner.owner_id)
        .bind(&owner.name)
        .bind(&owner.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(owner_id)
    }

    /// Inserts a car
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` if the VIN is already registered
    pub async fn insert(&self, car: NewCar) -> Result<Uuid, DatabaseError> {
        let car_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO cars (car_id, vin, make, model, year_of_manufacture, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING car_id
            "#,
        )
        .bind(car.car_id)
        .bind(&car.vin)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year_of_manufacture)
        .bind(car.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(car_id)
    }
}

/// Database row for a car joined with its owner
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CarRow {
    pub car_id: Uuid,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: Option<Uuid>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
}

/// Data for creating a new owner
#[derive(Debug, Clone)]
pub struct NewOwner {
    pub owner_id: Uuid,
    pub name: String,
    pub email: Option<String>,
}

/// Data for creating a new car
#[derive(Debug, Clone)]
pub struct NewCar {
    pub car_id: Uuid,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: Option<Uuid>,
}
