//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the motor insurance
//! system using SQLx: connection pooling, embedded migrations, repositories
//! for cars, policies and claims, and the adapter implementing the domain's
//! `RecordStorePort`.
//!
//! # Architecture
//!
//! The crate follows the repository pattern, providing data access abstractions
//! that hide the database implementation details from the domain layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresRecordStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/motor_insurance")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresRecordStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresRecordStore;
