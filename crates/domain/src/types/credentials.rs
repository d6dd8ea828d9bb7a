//! Client credentials for the OAuth2 client-credentials grant

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Consumer key/secret pair issued by the gateway.
///
/// Immutable after construction. The secret is only ever read to build the
/// Basic authorization header and is zeroed when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Create a credential pair from the consumer key and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into() }
    }

    /// Consumer key. Safe to log.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Build the `Authorization` header value for the token endpoint:
    /// `Basic base64(client_id:client_secret)`, standard alphabet, padded.
    ///
    /// The pair is joined as-is; a `:` in either half is not escaped.
    pub fn basic_authorization(&self) -> String {
        let raw = Zeroizing::new(format!("{}:{}", self.client_id, self.client_secret));
        format!("Basic {}", STANDARD.encode(raw.as_bytes()))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}
