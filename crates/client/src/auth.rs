//! Token authority
//!
//! Exchanges the consumer key/secret for a bearer token using the OAuth2
//! client-credentials grant. Stateless apart from the credentials it holds:
//! every call performs exactly one round trip to the token endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serpro_domain::classification::{extract_access_token, parse_document};
use serpro_domain::constants::{CONTENT_TYPE_FORM, GRANT_TYPE_CLIENT_CREDENTIALS, TOKEN_PATH};
use serpro_domain::{AccessToken, Credentials, Result, SerproError};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::http::{endpoint_url, HttpRequest, Transport};

/// Trait for providing access tokens
///
/// The facade depends on this rather than on [`TokenAuthority`] so the token
/// source can be replaced in tests.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Obtain a fresh bearer token.
    async fn access_token(&self) -> Result<AccessToken>;
}

/// Client-credentials token source for the gateway's `/token` endpoint.
pub struct TokenAuthority {
    credentials: Credentials,
    token_url: Url,
    transport: Arc<dyn Transport>,
}

impl TokenAuthority {
    /// # Errors
    /// `SerproError::Config` if the token URL cannot be derived from
    /// `base_url`.
    pub fn new(
        credentials: Credentials,
        base_url: &Url,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let token_url = endpoint_url(base_url, TOKEN_PATH)?;
        Ok(Self { credentials, token_url, transport })
    }

    /// `Basic base64(client_id:client_secret)`
    pub fn basic_authorization(&self) -> String {
        self.credentials.basic_authorization()
    }

    /// Build the token request without sending it.
    ///
    /// # Errors
    /// `InvalidCredentials` if the encoded pair is rejected as a header value.
    pub fn build_request(&self) -> Result<HttpRequest> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS)
            .finish();

        Ok(HttpRequest::new(Method::POST, self.token_url.clone())
            .header(AUTHORIZATION, &self.basic_authorization())
            .map_err(|_| SerproError::InvalidCredentials)?
            .header(CONTENT_TYPE, CONTENT_TYPE_FORM)?
            .body(body))
    }

    /// Exchange the credentials for a bearer token.
    ///
    /// # Errors
    /// - `InvalidCredentials` if the credentials cannot be placed in a header
    /// - `Transport` if the round trip fails
    /// - `InvalidResponse` if the body has no string `access_token`
    #[instrument(skip(self), fields(client_id = %self.credentials.client_id()))]
    pub async fn authenticate(&self) -> Result<AccessToken> {
        let request = self.build_request().inspect_err(|err| {
            error!(error = %err, label = err.label(), "Could not build authentication request");
        })?;

        debug!("Sending authentication request");

        let response = self.transport.send(request).await.inspect_err(|err| {
            error!(error = %err, label = err.label(), "Authentication request failed");
        })?;

        let token = parse_document(&response.body)
            .and_then(|document| extract_access_token(&document))
            .inspect_err(|_| {
                error!(status = response.status, "Invalid response format during authentication");
            })?;

        info!("Authentication successful, token received");
        Ok(token)
    }
}

#[async_trait]
impl AccessTokenProvider for TokenAuthority {
    async fn access_token(&self) -> Result<AccessToken> {
        self.authenticate().await
    }
}
