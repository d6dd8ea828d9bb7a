//! Company taxpayer (CNPJ) client

use std::sync::Arc;

use serpro_domain::constants::CNPJ_BASIC_PATH;
use serpro_domain::{AccessToken, CnpjRequest, Document, Result};
use tracing::instrument;
use url::Url;

use super::lookup::LookupClient;
use crate::http::{HttpRequest, Transport};

/// Client for `GET /cnpj/v2/basica/{ni}`.
pub struct CnpjClient {
    inner: LookupClient,
}

impl CnpjClient {
    /// # Errors
    /// `SerproError::Config` if the endpoint cannot be derived from `base_url`.
    pub fn new(base_url: &Url, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self { inner: LookupClient::new("cnpj", base_url, CNPJ_BASIC_PATH, transport)? })
    }

    /// Replace the bearer token used by later queries.
    pub fn set_token(&self, token: AccessToken) {
        self.inner.set_token(token);
    }

    /// Whether a token has been set.
    pub fn has_token(&self) -> bool {
        self.inner.has_token()
    }

    /// Build the authorized CNPJ request without sending it.
    pub fn build_request(&self, token: &AccessToken, request: &CnpjRequest) -> Result<HttpRequest> {
        self.inner.build_request(token, request)
    }

    /// Basic registration data for a company, by CNPJ.
    #[instrument(skip(self, request))]
    pub async fn query(&self, request: &CnpjRequest) -> Result<Document> {
        self.inner.query(request).await
    }
}
