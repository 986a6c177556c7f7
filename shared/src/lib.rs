//! Shared types for the invoice printing workspace
//!
//! Value objects handed to the print pipeline by the surrounding
//! application: company profile, invoice snapshot and printer configuration.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
