//! Shared fixtures for the client integration tests

#![allow(dead_code)]

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serpro_client::{
    AccessToken, AccessTokenProvider, HttpRequest, HttpResponse, Result, SerproError, Transport,
};

/// In-memory transport that records every request and replays scripted
/// responses in order.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with a JSON body.
    pub fn push_json(&self, body: serde_json::Value) {
        self.responses.lock().push_back(Ok(HttpResponse::new(200, body.to_string())));
    }

    pub fn push_error(&self, error: SerproError) {
        self.responses.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// `Authorization` header of every recorded request, in order.
    pub fn authorizations(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|r| r.header_str("authorization").unwrap_or_default().to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(SerproError::Transport("no scripted response".into())))
    }
}

/// Token source that hands out scripted outcomes in order.
#[derive(Default)]
pub struct ScriptedTokenProvider {
    outcomes: Mutex<VecDeque<Result<AccessToken>>>,
    calls: Mutex<usize>,
}

impl ScriptedTokenProvider {
    pub fn new(outcomes: impl IntoIterator<Item = Result<AccessToken>>) -> Self {
        Self { outcomes: Mutex::new(outcomes.into_iter().collect()), calls: Mutex::new(0) }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl AccessTokenProvider for ScriptedTokenProvider {
    async fn access_token(&self) -> Result<AccessToken> {
        *self.calls.lock() += 1;
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(SerproError::Transport("no scripted token".into())))
    }
}

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("debug").try_init();
}
