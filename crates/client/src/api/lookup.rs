//! Identifier lookup shared by the CPF and CNPJ families
//!
//! Both endpoints are `GET {prefix}/{ni}` with a bearer token, optional
//! `x-signature` / `x-request-tag` headers and a lowercase `status` /
//! `mensagem` pair in the response body.

use std::sync::Arc;

use reqwest::header::{HeaderName, AUTHORIZATION};
use reqwest::Method;
use serpro_domain::classification::{classify_lookup, parse_document};
use serpro_domain::constants::{HEADER_REQUEST_TAG, HEADER_SIGNATURE};
use serpro_domain::{AccessToken, Document, LookupRequest, Result, SerproError};
use tracing::{debug, error, info};
use url::Url;

use super::token_slot::TokenSlot;
use crate::http::{endpoint_url, HttpRequest, Transport};

pub(crate) struct LookupClient {
    family: &'static str,
    base_url: Url,
    path: &'static [&'static str],
    transport: Arc<dyn Transport>,
    token: TokenSlot,
}

impl LookupClient {
    pub(crate) fn new(
        family: &'static str,
        base_url: &Url,
        path: &'static [&'static str],
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        // fail on a bad base URL at construction rather than on first query
        endpoint_url(base_url, path)?;
        Ok(Self { family, base_url: base_url.clone(), path, transport, token: TokenSlot::new() })
    }

    pub(crate) fn set_token(&self, token: AccessToken) {
        self.token.set(token);
    }

    pub(crate) fn has_token(&self) -> bool {
        self.token.is_set()
    }

    pub(crate) fn build_request(
        &self,
        token: &AccessToken,
        request: &LookupRequest,
    ) -> Result<HttpRequest> {
        if request.ni.trim().is_empty() {
            return Err(SerproError::InvalidRequest(format!(
                "{} number must not be empty",
                self.family
            )));
        }

        let mut segments: Vec<&str> = self.path.iter().copied().collect();
        segments.push(request.ni.as_str());
        let url = endpoint_url(&self.base_url, &segments)?;

        let mut http_request =
            HttpRequest::new(Method::GET, url).header(AUTHORIZATION, &token.bearer())?;

        if let Some(signature) = &request.signature {
            http_request =
                http_request.header(HeaderName::from_static(HEADER_SIGNATURE), signature)?;
        }

        if let Some(tag) = &request.request_tag {
            http_request =
                http_request.header(HeaderName::from_static(HEADER_REQUEST_TAG), tag)?;
        }

        Ok(http_request)
    }

    pub(crate) async fn query(&self, request: &LookupRequest) -> Result<Document> {
        let family = self.family;
        let token = self.token.require().inspect_err(|_| {
            error!(family, "No access token available for consulta");
        })?;

        let http_request = self.build_request(&token, request)?;
        debug!(
            family,
            has_signature = request.signature.is_some(),
            has_request_tag = request.request_tag.is_some(),
            "Sending consulta request"
        );

        let response = self.transport.send(http_request).await?;

        let document = parse_document(&response.body).inspect_err(|_| {
            error!(family, status = response.status, "Invalid response format during consulta");
        })?;

        match classify_lookup(document) {
            Ok(document) => {
                info!(family, "Consulta successful, response received");
                Ok(document)
            }
            Err(err) => {
                error!(family, error = %err, label = err.label(), "Consulta failed");
                Err(err)
            }
        }
    }
}
