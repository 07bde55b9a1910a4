//! Repository implementations for the motor records
//!
//! This module provides concrete repository implementations that handle
//! database access for cars, policies and claims. Repositories encapsulate
//! SQL queries and map database rows to plain row structs; translation to
//! domain types happens in the adapters.
//!
//! # Architecture
//!
//! Each repository follows these principles:
//! - Runtime-checked queries mapped through `sqlx::FromRow`
//! - Deterministic ordering with explicit tie-breakers
//! - Errors surfaced as `DatabaseError`

pub mod cars;
pub mod policies;
pub mod claims;

pub use cars::{CarRepository, CarRow, NewCar, NewOwner};
pub use policies::{PolicyRepository, PolicyRow, NewPolicy};
pub use claims::{ClaimsRepository, ClaimRow, NewClaimRow};
