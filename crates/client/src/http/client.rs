//! reqwest implementation of the transport seam

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serpro_domain::constants::DEFAULT_TIMEOUT_SECS;
use serpro_domain::Result;
use tracing::debug;

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::errors::ClientError;

/// reqwest-backed [`Transport`]. One attempt per request, no retries.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Execute the request once and buffer the response body.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest { method, url, headers, body } = request;

        let mut builder = self.client.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        debug!(%method, path = url.path(), "sending HTTP request");

        let response = builder.send().await.map_err(|err| {
            debug!(%method, path = url.path(), error = %err, "HTTP request failed");
            ClientError::from(err)
        })?;

        let status = response.status();
        debug!(%method, path = url.path(), %status, "received HTTP response");

        let body = response.bytes().await.map_err(ClientError::from)?;
        Ok(HttpResponse { status: status.as_u16(), body: body.to_vec() })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.execute(request).await
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    /// Whole-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` sent with every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    /// `SerproError::InvalidRequest` if reqwest rejects the configuration.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(ClientError::from)?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::header::{HeaderName, CONTENT_TYPE};
    use reqwest::Method;
    use serpro_domain::SerproError;
    use url::Url;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_with_defaults() -> HttpClient {
        HttpClient::builder().timeout(Duration::from_secs(5)).build().expect("http client")
    }

    fn url(server: &MockServer, route: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), route)).unwrap()
    }

    #[tokio::test]
    async fn returns_body_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":200}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let response =
            client.execute(HttpRequest::new(Method::GET, url(&server, "/ok"))).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"status":200}"#);
    }

    #[tokio::test]
    async fn does_not_retry_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let response =
            client.execute(HttpRequest::new(Method::GET, url(&server, "/"))).await.unwrap();

        assert_eq!(response.status, 500);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn forwards_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("content-type", "application/json"))
            .and(header("x-request-tag", "tag-1"))
            .and(body_string(r#"{"a":1}"#))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let request = HttpRequest::new(Method::POST, url(&server, "/"))
            .header(CONTENT_TYPE, "application/json")
            .unwrap()
            .header(HeaderName::from_static("x-request-tag"), "tag-1")
            .unwrap()
            .body(r#"{"a":1}"#);

        let response = client_with_defaults().send(request).await.unwrap();
        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn sends_configured_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "serpro-tests/1.0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::builder().user_agent("serpro-tests/1.0").build().unwrap();
        let response = client.execute(HttpRequest::new(Method::GET, url(&server, "/"))).await;
        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn network_failure_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED
        let url = Url::parse(&format!("http://{}", addr)).unwrap();

        let result = client_with_defaults().execute(HttpRequest::new(Method::GET, url)).await;
        match result {
            Err(SerproError::Transport(msg)) => {
                assert!(msg.to_lowercase().contains("http"));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
