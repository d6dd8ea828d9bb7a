//! Bearer access token

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque bearer token issued by the token endpoint.
///
/// Expiry is not tracked; a stale token is only discovered when the gateway
/// rejects a call. Every query client holds its own copy.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value. Do not log it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value for authorized requests.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_wraps_raw_token() {
        assert_eq!(AccessToken::new("T").bearer(), "Bearer T");
    }

    #[test]
    fn debug_output_hides_token() {
        assert_eq!(format!("{:?}", AccessToken::from("secret-token")), "AccessToken(***)");
    }
}
