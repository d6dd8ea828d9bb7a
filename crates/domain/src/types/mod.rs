//! Domain types and models

pub mod credentials;
pub mod request;
pub mod token;

pub use credentials::Credentials;
pub use request::{CndRequest, CnpjRequest, CpfRequest, LookupRequest, TaxpayerKind};
pub use token::AccessToken;

/// Parsed JSON object returned by the gateway.
///
/// No schema is enforced beyond the fields used for error classification.
pub type Document = serde_json::Map<String, serde_json::Value>;
