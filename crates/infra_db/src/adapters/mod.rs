//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresRecordStore;
//! use domain_motor::RecordStorePort;
//!
//! let store = PostgresRecordStore::new(pool);
//! let cars = store.list_cars().await?;
//! ```

pub mod record_store;

pub use record_store::PostgresRecordStore;
