//! # SERPRO Domain
//!
//! Business domain types for the SERPRO tax-document gateway client.
//!
//! This crate contains:
//! - Credential, token and request parameter types
//! - The error taxonomy and `Result` alias
//! - Configuration structures
//! - Wire constants (endpoints, field names, status codes)
//! - Pure response classification
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O: everything here is a pure function of its inputs

pub mod classification;
pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
