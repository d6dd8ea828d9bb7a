//! Gateway facade
//!
//! [`SerproClient`] owns one token source and one client per query family.
//! `authenticate()` fetches a token and writes it into every query client;
//! the query methods are pass-throughs. Each operation also has a
//! `*_with_callback` form that runs the same async core and reports through a
//! completion handler.

use std::sync::Arc;
use std::time::Duration;

use serpro_domain::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serpro_domain::{
    CndRequest, CnpjRequest, CpfRequest, Credentials, Document, Result, SerproConfig, SerproError,
};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::api::{CndClient, CnpjClient, CpfClient};
use crate::auth::{AccessTokenProvider, TokenAuthority};
use crate::callback::dispatch;
use crate::http::{parse_base_url, HttpClient, Transport};

/// Long-lived handle to the gateway. Clones share the same token slots.
///
/// The per-family query clients stay private: tokens only reach them through
/// [`authenticate`](Self::authenticate).
///
/// ```compile_fail
/// # fn check(client: serpro_client::SerproClient) {
/// client.cpf().set_token(serpro_client::AccessToken::from("T"));
/// # }
/// ```
#[derive(Clone)]
pub struct SerproClient {
    inner: Arc<Inner>,
}

struct Inner {
    authority: Arc<dyn AccessTokenProvider>,
    cnd: CndClient,
    cpf: CpfClient,
    cnpj: CnpjClient,
}

impl SerproClient {
    /// Client for the production gateway with default settings.
    ///
    /// # Errors
    /// `SerproError::InvalidRequest` if the HTTP client cannot be initialised.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        Self::builder().credentials(Credentials::new(client_id, client_secret)).build()
    }

    /// Start configuring a client.
    pub fn builder() -> SerproClientBuilder {
        SerproClientBuilder::default()
    }

    /// Build a client from a loaded configuration.
    ///
    /// # Errors
    /// `SerproError::Config` if the configuration does not validate.
    pub fn from_config(config: &SerproConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Self::builder()
            .credentials(config.credentials())
            .base_url(config.base_url.clone())
            .timeout(config.timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Fetch a fresh token and hand it to every query client.
    ///
    /// On failure no client is touched, so tokens from an earlier successful
    /// call stay in place.
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<()> {
        let token = self.inner.authority.access_token().await.inspect_err(|err| {
            error!(error = %err, label = err.label(), "Authentication failed");
        })?;

        self.inner.cnd.set_token(token.clone());
        self.inner.cpf.set_token(token.clone());
        self.inner.cnpj.set_token(token);

        info!("Access token distributed to query clients");
        Ok(())
    }

    /// True once a token has been distributed.
    pub fn is_authenticated(&self) -> bool {
        self.inner.cnd.has_token() && self.inner.cpf.has_token() && self.inner.cnpj.has_token()
    }

    /// Request a tax-clearance certificate. See [`CndClient::query`].
    pub async fn query_cnd(&self, request: &CndRequest) -> Result<Document> {
        self.inner.cnd.query(request).await
    }

    /// Look up an individual by CPF. See [`CpfClient::query`].
    pub async fn query_cpf(&self, request: &CpfRequest) -> Result<Document> {
        self.inner.cpf.query(request).await
    }

    /// Basic company data by CNPJ. See [`CnpjClient::query`].
    pub async fn query_cnpj_basic(&self, request: &CnpjRequest) -> Result<Document> {
        self.inner.cnpj.query(request).await
    }

    /// Callback form of [`authenticate`](Self::authenticate).
    ///
    /// Returns the spawned task, or `None` when called outside a tokio
    /// runtime, in which case the operation runs on a dedicated thread. The
    /// completion is invoked exactly once either way.
    pub fn authenticate_with_callback<F>(&self, completion: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        let client = self.clone();
        dispatch("authenticate", async move { client.authenticate().await }, completion)
    }

    /// Callback form of [`query_cnd`](Self::query_cnd).
    pub fn query_cnd_with_callback<F>(
        &self,
        request: CndRequest,
        completion: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Result<Document>) + Send + 'static,
    {
        let client = self.clone();
        dispatch("query_cnd", async move { client.query_cnd(&request).await }, completion)
    }

    /// Callback form of [`query_cpf`](Self::query_cpf).
    pub fn query_cpf_with_callback<F>(
        &self,
        request: CpfRequest,
        completion: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Result<Document>) + Send + 'static,
    {
        let client = self.clone();
        dispatch("query_cpf", async move { client.query_cpf(&request).await }, completion)
    }

    /// Callback form of [`query_cnpj_basic`](Self::query_cnpj_basic).
    pub fn query_cnpj_basic_with_callback<F>(
        &self,
        request: CnpjRequest,
        completion: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Result<Document>) + Send + 'static,
    {
        let client = self.clone();
        dispatch(
            "query_cnpj_basic",
            async move { client.query_cnpj_basic(&request).await },
            completion,
        )
    }
}

/// Builder for [`SerproClient`]
pub struct SerproClientBuilder {
    credentials: Option<Credentials>,
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    token_provider: Option<Arc<dyn AccessTokenProvider>>,
}

impl Default for SerproClientBuilder {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            transport: None,
            token_provider: None,
        }
    }
}

impl SerproClientBuilder {
    /// Consumer key/secret for the built-in token authority.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Gateway base URL. Defaults to the production gateway.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Replace the reqwest transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the client-credentials token source.
    pub fn token_provider(mut self, provider: Arc<dyn AccessTokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// # Errors
    /// - `SerproError::Config` for an invalid base URL, or when neither
    ///   credentials nor a token provider were supplied
    /// - `SerproError::InvalidRequest` if the default HTTP client cannot be
    ///   built
    pub fn build(self) -> Result<SerproClient> {
        let base_url = parse_base_url(&self.base_url)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let mut http = HttpClient::builder().timeout(self.timeout);
                if let Some(agent) = self.user_agent {
                    http = http.user_agent(agent);
                }
                Arc::new(http.build()?)
            }
        };

        let authority: Arc<dyn AccessTokenProvider> = match (self.token_provider, self.credentials)
        {
            (Some(provider), _) => provider,
            (None, Some(credentials)) => {
                Arc::new(TokenAuthority::new(credentials, &base_url, Arc::clone(&transport))?)
            }
            (None, None) => {
                return Err(SerproError::Config(
                    "credentials or a token provider are required".into(),
                ))
            }
        };

        Ok(SerproClient {
            inner: Arc::new(Inner {
                authority,
                cnd: CndClient::new(&base_url, Arc::clone(&transport))?,
                cpf: CpfClient::new(&base_url, Arc::clone(&transport))?,
                cnpj: CnpjClient::new(&base_url, transport)?,
            }),
        })
    }
}
