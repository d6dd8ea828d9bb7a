//! Tax-clearance certificate (CND) client

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serpro_domain::classification::{classify_certidao, parse_document};
use serpro_domain::constants::{CND_PATH, CONTENT_TYPE_JSON};
use serpro_domain::{AccessToken, CndRequest, Document, Result, SerproError};
use tracing::{debug, error, info, instrument};
use url::Url;

use super::token_slot::TokenSlot;
use crate::errors::ClientError;
use crate::http::{endpoint_url, HttpRequest, Transport};

/// Client for `POST /consulta-cnd-trial/v1/certidao`.
pub struct CndClient {
    url: Url,
    transport: Arc<dyn Transport>,
    token: TokenSlot,
}

impl CndClient {
    /// # Errors
    /// `SerproError::Config` if the endpoint cannot be derived from `base_url`.
    pub fn new(base_url: &Url, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self { url: endpoint_url(base_url, CND_PATH)?, transport, token: TokenSlot::new() })
    }

    /// Replace the bearer token used by later queries.
    pub fn set_token(&self, token: AccessToken) {
        self.token.set(token);
    }

    /// Whether a token has been set.
    pub fn has_token(&self) -> bool {
        self.token.is_set()
    }

    /// Build the authorized request. `Chave` is only sent when the request
    /// carries a key.
    pub fn build_request(&self, token: &AccessToken, request: &CndRequest) -> Result<HttpRequest> {
        let body = serde_json::to_vec(request).map_err(ClientError::from)?;

        Ok(HttpRequest::new(Method::POST, self.url.clone())
            .header(AUTHORIZATION, &token.bearer())?
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)?
            .body(body))
    }

    /// Request a tax-clearance certificate.
    ///
    /// # Errors
    /// - `NoAccessToken` before a token was set (nothing is sent)
    /// - `Transport` / `InvalidResponse` for network and parse failures
    /// - `ProcessingKey` when the certificate is still being produced
    /// - `ServerError` when the gateway rejects the request
    #[instrument(
        skip(self, request),
        fields(taxpayer_kind = request.taxpayer_kind.code(), has_key = request.key.is_some())
    )]
    pub async fn query(&self, request: &CndRequest) -> Result<Document> {
        let token = self.token.require().inspect_err(|_| {
            error!("No access token available for consulta CND");
        })?;

        let http_request = self.build_request(&token, request)?;
        debug!(path = self.url.path(), "Sending consulta CND request");

        let response = self.transport.send(http_request).await?;

        let document = parse_document(&response.body).inspect_err(|_| {
            error!(status = response.status, "Invalid response format during consulta CND");
        })?;

        match classify_certidao(document) {
            Ok(document) => {
                info!("Consulta CND successful, response received");
                Ok(document)
            }
            Err(SerproError::ProcessingKey(key)) => {
                info!("Consulta CND in processing, key received");
                Err(SerproError::ProcessingKey(key))
            }
            Err(err) => {
                error!(error = %err, label = err.label(), "Consulta CND failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use serpro_domain::TaxpayerKind;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::{parse_base_url, HttpClient};

    fn client(server: &MockServer) -> CndClient {
        let transport = Arc::new(HttpClient::new().unwrap());
        CndClient::new(&parse_base_url(&server.uri()).unwrap(), transport).unwrap()
    }

    fn request() -> CndRequest {
        CndRequest::new(TaxpayerKind::LegalEntity, "00000000000191", "41", false)
    }

    async fn mount_response(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/consulta-cnd-trial/v1/certidao"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn query_without_token_fails_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server).query(&request()).await;
        assert_eq!(result, Err(SerproError::NoAccessToken));
    }

    #[tokio::test]
    async fn sends_bearer_token_and_provider_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/consulta-cnd-trial/v1/certidao"))
            .and(header("authorization", "Bearer T"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "TipoContribuinte": 1,
                "ContribuinteConsulta": "00000000000191",
                "CodigoIdentificacao": "41",
                "GerarCertidaoPdf": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Status": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client.set_token(AccessToken::from("T"));
        let document = client.query(&request()).await.unwrap();
        assert_eq!(document["Status"], 1);
    }

    #[tokio::test]
    async fn key_is_sent_only_when_present() {
        let server = MockServer::start().await;
        mount_response(&server, json!({"Status": 1})).await;

        let client = client(&server);
        client.set_token(AccessToken::from("T"));
        client.query(&request()).await.unwrap();
        client.query(&request().with_key("K123")).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let first: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
        assert!(first.get("Chave").is_none());
        assert_eq!(second["Chave"], "K123");
    }

    #[tokio::test]
    async fn status_seven_yields_processing_key() {
        let server = MockServer::start().await;
        mount_response(&server, json!({"Status": 7, "Chave": "K123"})).await;

        let client = client(&server);
        client.set_token(AccessToken::from("T"));
        let result = client.query(&request()).await;
        assert_eq!(result, Err(SerproError::ProcessingKey("K123".into())));
    }

    #[tokio::test]
    async fn rejection_yields_server_error_with_message() {
        let server = MockServer::start().await;
        mount_response(&server, json!({"Status": 2, "Messagem": "bad input"})).await;

        let client = client(&server);
        client.set_token(AccessToken::from("T"));
        let result = client.query(&request()).await;
        assert_eq!(result, Err(SerproError::ServerError { code: 2, message: "bad input".into() }));
    }

    #[tokio::test]
    async fn success_returns_full_document() {
        let server = MockServer::start().await;
        let body = json!({
            "Status": 1,
            "Mensagem": ["Certidão emitida"],
            "Certidao": {"TipoCertidao": 1, "CodigoControle": "ABCD"}
        });
        mount_response(&server, body.clone()).await;

        let client = client(&server);
        client.set_token(AccessToken::from("T"));
        let document = client.query(&request()).await.unwrap();
        assert_eq!(serde_json::Value::Object(document), body);
    }

    #[tokio::test]
    async fn array_body_is_invalid_response() {
        let server = MockServer::start().await;
        mount_response(&server, json!([1, 2, 3])).await;

        let client = client(&server);
        client.set_token(AccessToken::from("T"));
        assert_eq!(client.query(&request()).await, Err(SerproError::InvalidResponse));
    }
}
