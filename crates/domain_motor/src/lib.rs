//! Motor Insurance Domain
//!
//! This crate answers point-in-time questions about insured cars and watches
//! for policies whose coverage ends.
//!
//! # Components
//!
//! - **Validity Evaluator**: is a car covered by some policy on a given date?
//! - **History Merger**: one chronological view over a car's policies and claims
//! - **Expiry Watcher**: recurring scan that reports each expiring policy once
//!
//! All three read through the [`RecordStorePort`], so the same logic runs
//! against PostgreSQL in production and an in-memory store in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_motor::{ValidityEvaluator, HistoryMerger};
//!
//! let store: Arc<dyn RecordStorePort> = Arc::new(adapter);
//! let valid = ValidityEvaluator::new(store.clone())
//!     .is_insurance_valid(car_id, date)
//!     .await?;
//! let history = HistoryMerger::new(store).car_history(car_id).await?;
//! ```

pub mod car;
pub mod policy;
pub mod claim;
pub mod ports;
pub mod validity;
pub mod history;
pub mod expiry;
pub mod error;

pub use car::{Car, Owner};
pub use policy::InsurancePolicy;
pub use claim::{InsuranceClaim, NewClaim};
pub use ports::RecordStorePort;
pub use validity::ValidityEvaluator;
pub use history::{HistoryEvent, HistoryMerger, merge_history};
pub use expiry::{ExpiryWatcher, ExpiryNotice, PassReport, WatcherConfig, WatcherHandle, WatcherState, WatcherStats};
pub use error::MotorError;
