//! Transport seam
//!
//! Query clients and the token authority never talk to reqwest directly. They
//! build an [`HttpRequest`] and hand it to a [`Transport`], which performs a
//! single round trip. Tests swap in recording transports; production uses
//! [`super::HttpClient`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serpro_domain::Result;
use url::Url;

use crate::errors::ClientError;

/// Fully formed outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute target URL
    pub url: Url,
    /// Request headers, `Authorization` marked sensitive
    pub headers: HeaderMap,
    /// Raw body, if any
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Request with no headers and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url, headers: HeaderMap::new(), body: None }
    }

    /// Add a header. `Authorization` values are marked sensitive so they
    /// never show up in `Debug` output.
    ///
    /// # Errors
    /// `SerproError::InvalidRequest` if the value is not a valid header value.
    pub fn header(mut self, name: HeaderName, value: &str) -> Result<Self> {
        let mut value = HeaderValue::from_str(value).map_err(ClientError::from)?;
        if name == AUTHORIZATION {
            value.set_sensitive(true);
        }
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Set the raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Header value as a string, if present and visible ASCII.
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Response as seen by the business logic: status and raw body.
///
/// The status is informational only; outcomes are classified from the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Buffered response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Response with the given status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Sends one request and returns the response, or a transport error.
///
/// Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` once.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use reqwest::header::CONTENT_TYPE;
    use serpro_domain::SerproError;

    use super::*;

    fn url() -> Url {
        Url::parse("https://gateway.example.com/token").unwrap()
    }

    #[test]
    fn authorization_header_is_hidden_from_debug() {
        let request =
            HttpRequest::new(Method::GET, url()).header(AUTHORIZATION, "Bearer secret").unwrap();

        assert_eq!(request.header_str("authorization"), Some("Bearer secret"));
        assert!(!format!("{request:?}").contains("secret"));
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        let result = HttpRequest::new(Method::GET, url()).header(CONTENT_TYPE, "text/\r\nplain");
        assert!(matches!(result, Err(SerproError::InvalidRequest(_))));
    }

    #[test]
    fn body_is_attached() {
        let request = HttpRequest::new(Method::POST, url()).body("grant_type=client_credentials");
        assert_eq!(request.body.as_deref(), Some(b"grant_type=client_credentials".as_slice()));
    }
}
