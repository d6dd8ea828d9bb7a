//! Response classification
//!
//! The gateway answers most calls with HTTP 200 and encodes the business
//! outcome inside the JSON body. These functions turn a raw body into either
//! the success document or a typed [`SerproError`]. They never look at the
//! HTTP status and have no side effects.

use serde_json::Value;

use crate::constants::{
    CND_FIELD_KEY, CND_FIELD_MESSAGE, CND_FIELD_STATUS, CND_STATUS_OK, CND_STATUS_PROCESSING,
    FIELD_ACCESS_TOKEN, LOOKUP_FIELD_MESSAGE, LOOKUP_FIELD_STATUS, LOOKUP_STATUS_OK,
    UNKNOWN_ERROR_MESSAGE,
};
use crate::errors::{Result, SerproError};
use crate::types::{AccessToken, Document};

/// Parse a response body as a JSON object.
///
/// # Errors
/// [`SerproError::InvalidResponse`] if the body is not JSON or not an object.
pub fn parse_document(body: &[u8]) -> Result<Document> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(document)) => Ok(document),
        _ => Err(SerproError::InvalidResponse),
    }
}

/// Pull the bearer token out of a token-endpoint document.
///
/// # Errors
/// [`SerproError::InvalidResponse`] if `access_token` is missing or not a
/// string.
pub fn extract_access_token(document: &Document) -> Result<AccessToken> {
    document
        .get(FIELD_ACCESS_TOKEN)
        .and_then(Value::as_str)
        .map(AccessToken::from)
        .ok_or(SerproError::InvalidResponse)
}

/// Classify a tax-clearance (CND) response.
///
/// - `Status == 7` with a string `Chave`: still processing.
/// - any other integer `Status != 1`: rejected, with `Messagem`.
/// - anything else, including a missing `Status`: success.
pub fn classify_certidao(document: Document) -> Result<Document> {
    let status = integer_field(&document, CND_FIELD_STATUS);

    if status == Some(CND_STATUS_PROCESSING) {
        if let Some(key) = document.get(CND_FIELD_KEY).and_then(Value::as_str) {
            return Err(SerproError::ProcessingKey(key.to_string()));
        }
    }

    match status {
        Some(code) if code != CND_STATUS_OK => Err(SerproError::ServerError {
            code,
            message: message_or_placeholder(&document, CND_FIELD_MESSAGE),
        }),
        _ => Ok(document),
    }
}

/// Classify an identifier lookup (CPF/CNPJ) response.
///
/// An integer `status` other than 200 is a rejection carrying `mensagem`.
pub fn classify_lookup(document: Document) -> Result<Document> {
    match integer_field(&document, LOOKUP_FIELD_STATUS) {
        Some(code) if code != LOOKUP_STATUS_OK => Err(SerproError::ServerError {
            code,
            message: message_or_placeholder(&document, LOOKUP_FIELD_MESSAGE),
        }),
        _ => Ok(document),
    }
}

/// Whole-number status, whether the gateway sent `7` or `7.0`.
fn integer_field(document: &Document, field: &str) -> Option<i64> {
    let value = document.get(field)?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64)
            .map(|n| n as i64)
    })
}

fn message_or_placeholder(document: &Document, field: &str) -> String {
    document
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_string()
}
