//! Individual taxpayer (CPF) client

use std::sync::Arc;

use serpro_domain::constants::CPF_PATH;
use serpro_domain::{AccessToken, CpfRequest, Document, Result};
use tracing::instrument;
use url::Url;

use super::lookup::LookupClient;
use crate::http::{HttpRequest, Transport};

/// Client for `GET /cpf/v1/{ni}`.
pub struct CpfClient {
    inner: LookupClient,
}

impl CpfClient {
    /// # Errors
    /// `SerproError::Config` if the endpoint cannot be derived from `base_url`.
    pub fn new(base_url: &Url, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self { inner: LookupClient::new("cpf", base_url, CPF_PATH, transport)? })
    }

    /// Replace the bearer token used by later queries.
    pub fn set_token(&self, token: AccessToken) {
        self.inner.set_token(token);
    }

    /// Whether a token has been set.
    pub fn has_token(&self) -> bool {
        self.inner.has_token()
    }

    /// Build the authorized CPF request without sending it.
    pub fn build_request(&self, token: &AccessToken, request: &CpfRequest) -> Result<HttpRequest> {
        self.inner.build_request(token, request)
    }

    /// Look up an individual taxpayer by CPF.
    ///
    /// # Errors
    /// `NoAccessToken` before a token was set; `ServerError` when the body's
    /// `status` is not 200; `Transport` / `InvalidResponse` otherwise.
    #[instrument(skip(self, request))]
    pub async fn query(&self, request: &CpfRequest) -> Result<Document> {
        self.inner.query(request).await
    }
}
