//! Core Kernel - Foundational types and utilities for the motor insurance system
//!
//! This crate provides the building blocks used across the domain and
//! infrastructure crates:
//! - Strongly-typed identifiers for cars, owners, policies and claims
//! - Calendar date ranges and supported-date parsing
//! - Port error and health-check types for the adapter layer

pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use temporal::{DateRange, Timezone, TemporalError};
pub use identifiers::{CarId, OwnerId, PolicyId, ClaimId};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
