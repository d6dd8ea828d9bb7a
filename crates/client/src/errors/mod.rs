//! Error plumbing for the client crate
//!
//! The error taxonomy itself lives in `serpro-domain`; this module only holds
//! the conversions from third-party errors into it.

pub mod conversions;

pub use conversions::ClientError;
