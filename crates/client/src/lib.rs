//! # SERPRO Client
//!
//! Authenticated client for the SERPRO API gateway.
//!
//! This crate contains:
//! - The HTTP transport seam and its reqwest implementation
//! - The client-credentials token authority
//! - Query clients for tax-clearance certificates (CND), CPF and CNPJ
//! - The [`SerproClient`] facade with async and callback calling conventions
//! - Configuration loading from the environment or JSON/TOML files
//!
//! ## Architecture
//! - Domain types, errors and response classification live in
//!   `serpro-domain`
//! - Contains all I/O: HTTP, filesystem, environment
//!
//! ```no_run
//! # async fn run() -> serpro_client::Result<()> {
//! use serpro_client::{CpfRequest, SerproClient};
//!
//! let client = SerproClient::new("consumer-key", "consumer-secret")?;
//! client.authenticate().await?;
//! let person = client.query_cpf(&CpfRequest::new("40442820135")).await?;
//! println!("{}", person["nome"]);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
mod callback;
pub mod config;
pub mod errors;
pub mod facade;
pub mod http;

pub use serpro_domain as domain;
pub use serpro_domain::{
    AccessToken, CndRequest, CnpjRequest, CpfRequest, Credentials, Document, LookupRequest,
    Result, SerproConfig, SerproError, TaxpayerKind,
};

// Re-export commonly used items
pub use api::{CndClient, CnpjClient, CpfClient, TokenSlot};
pub use auth::{AccessTokenProvider, TokenAuthority};
pub use facade::{SerproClient, SerproClientBuilder};
pub use http::{HttpClient, HttpRequest, HttpResponse, Transport};
