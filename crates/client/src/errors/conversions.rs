//! Conversions from external client errors into the domain error.

use reqwest::header::InvalidHeaderValue;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use serpro_domain::SerproError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the client side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct ClientError(pub SerproError);

impl From<ClientError> for SerproError {
    fn from(value: ClientError) -> Self {
        value.0
    }
}

impl From<SerproError> for ClientError {
    fn from(value: SerproError) -> Self {
        ClientError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSerproError {
    fn into_serpro(self) -> SerproError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SerproError */
/* -------------------------------------------------------------------------- */

impl IntoSerproError for HttpError {
    fn into_serpro(self) -> SerproError {
        if self.is_builder() {
            return SerproError::InvalidRequest(format!("failed to build HTTP request: {self}"));
        }

        if self.is_timeout() {
            return SerproError::Transport(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return SerproError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_body() || self.is_decode() {
            return SerproError::Transport(format!("failed to read HTTP response body: {self}"));
        }

        SerproError::Transport(self.to_string())
    }
}

impl From<HttpError> for ClientError {
    fn from(value: HttpError) -> Self {
        ClientError(value.into_serpro())
    }
}

/* -------------------------------------------------------------------------- */
/* request-building errors → SerproError::InvalidRequest */
/* -------------------------------------------------------------------------- */

impl IntoSerproError for JsonError {
    fn into_serpro(self) -> SerproError {
        SerproError::InvalidRequest(format!("failed to encode JSON body: {self}"))
    }
}

impl From<JsonError> for ClientError {
    fn from(value: JsonError) -> Self {
        ClientError(value.into_serpro())
    }
}

impl IntoSerproError for InvalidHeaderValue {
    fn into_serpro(self) -> SerproError {
        SerproError::InvalidRequest(format!("invalid header value: {self}"))
    }
}

impl From<InvalidHeaderValue> for ClientError {
    fn from(value: InvalidHeaderValue) -> Self {
        ClientError(value.into_serpro())
    }
}

impl IntoSerproError for UrlError {
    fn into_serpro(self) -> SerproError {
        SerproError::Config(format!("invalid base URL: {self}"))
    }
}

impl From<UrlError> for ClientError {
    fn from(value: UrlError) -> Self {
        ClientError(value.into_serpro())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
