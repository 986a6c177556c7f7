//! Data models
//!
//! Read-only inputs of the print pipeline. Persistence lives elsewhere;
//! these types only describe what gets printed and where.

pub mod company;
pub mod invoice;
pub mod printer_config;

// Re-exports
pub use company::*;
pub use invoice::*;
pub use printer_config::*;
