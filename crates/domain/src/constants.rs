//! Gateway constants
//!
//! Endpoint paths, wire field names and status codes owned by the provider.
//! Field spellings (`Messagem`, lowercase `status`) are the provider's and
//! must not be normalized.

/// Production gateway base URL
pub const DEFAULT_BASE_URL: &str = "https://gateway.apiserpro.serpro.gov.br";
/// Default whole-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Endpoint paths, as URL path segments relative to the base URL
/// `POST /token`
pub const TOKEN_PATH: &[&str] = &["token"];
/// `POST /consulta-cnd-trial/v1/certidao`
pub const CND_PATH: &[&str] = &["consulta-cnd-trial", "v1", "certidao"];
/// `GET /cpf/v1/{ni}` prefix
pub const CPF_PATH: &[&str] = &["cpf", "v1"];
/// `GET /cnpj/v2/basica/{ni}` prefix
pub const CNPJ_BASIC_PATH: &[&str] = &["cnpj", "v2", "basica"];

// Token endpoint
/// OAuth2 grant sent in the form body
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";
/// Token field in the token response
pub const FIELD_ACCESS_TOKEN: &str = "access_token";
/// Token request body type
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
/// CND request body type
pub const CONTENT_TYPE_JSON: &str = "application/json";

// Optional identifier-lookup headers
/// Optional caller signature header
pub const HEADER_SIGNATURE: &str = "x-signature";
/// Optional caller request tag header
pub const HEADER_REQUEST_TAG: &str = "x-request-tag";

// Tax-clearance (CND) response fields
/// Integer outcome code
pub const CND_FIELD_STATUS: &str = "Status";
/// Rejection message (provider spelling)
pub const CND_FIELD_MESSAGE: &str = "Messagem";
/// Key of a certificate still being produced
pub const CND_FIELD_KEY: &str = "Chave";
/// Certificate issued
pub const CND_STATUS_OK: i64 = 1;
/// Certificate still processing
pub const CND_STATUS_PROCESSING: i64 = 7;

// Identifier lookup (CPF/CNPJ) response fields
/// Integer outcome code
pub const LOOKUP_FIELD_STATUS: &str = "status";
/// Rejection message
pub const LOOKUP_FIELD_MESSAGE: &str = "mensagem";
/// Lookup succeeded
pub const LOOKUP_STATUS_OK: i64 = 200;

/// Message used when the provider rejects a request without saying why
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";
