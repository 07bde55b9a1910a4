//! Request and response bodies
//!
//! All JSON field names are camelCase.

pub mod cars;
pub mod claims;
pub mod history;
