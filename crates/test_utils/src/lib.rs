//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! motor insurance test suite.
//!
//! # Modules
//!
//! - `fixtures`: Reference dates and a small fleet with known coverage
//! - `builders`: Builder patterns for cars, policies and claims
//! - `database`: Database test helpers and container management
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use generators::*;
