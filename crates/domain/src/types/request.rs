//! Query parameter types
//!
//! Pure value types built per call. The tax-clearance request serializes
//! straight into the gateway's JSON body, so the serde names below are the
//! provider's field names.

use serde::{Serialize, Serializer};

use crate::errors::SerproError;

/// Kind of taxpayer a tax-clearance certificate is requested for.
///
/// Sent on the wire as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TaxpayerKind {
    /// Pessoa jurídica (CNPJ)
    LegalEntity = 1,
    /// Pessoa física (CPF)
    Individual = 2,
    /// Imóvel rural (CIB)
    RuralProperty = 3,
}

impl TaxpayerKind {
    /// Integer code sent as `TipoContribuinte`.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TaxpayerKind {
    type Error = SerproError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::LegalEntity),
            2 => Ok(Self::Individual),
            3 => Ok(Self::RuralProperty),
            other => Err(SerproError::InvalidRequest(format!("unknown taxpayer kind {other}"))),
        }
    }
}

impl Serialize for TaxpayerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Tax-clearance certificate (CND) query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CndRequest {
    /// Taxpayer kind
    #[serde(rename = "TipoContribuinte")]
    pub taxpayer_kind: TaxpayerKind,
    /// CNPJ, CPF or CIB of the taxpayer
    #[serde(rename = "ContribuinteConsulta")]
    pub taxpayer_id: String,
    /// Identification code of the requested certificate
    #[serde(rename = "CodigoIdentificacao")]
    pub identification_code: String,
    /// Ask for the certificate PDF in the response
    #[serde(rename = "GerarCertidaoPdf")]
    pub generate_pdf: bool,
    /// Key returned by an earlier "processing" answer.
    #[serde(rename = "Chave", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl CndRequest {
    /// Request without a key.
    pub fn new(
        taxpayer_kind: TaxpayerKind,
        taxpayer_id: impl Into<String>,
        identification_code: impl Into<String>,
        generate_pdf: bool,
    ) -> Self {
        Self {
            taxpayer_kind,
            taxpayer_id: taxpayer_id.into(),
            identification_code: identification_code.into(),
            generate_pdf,
            key: None,
        }
    }

    /// Attach the key of a pending certificate to collect it.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Identifier lookup shared by the CPF and CNPJ families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Taxpayer number (CPF or CNPJ), interpolated into the path.
    pub ni: String,
    /// Client-supplied signature, sent as `x-signature`.
    pub signature: Option<String>,
    /// Client request tag, sent as `x-request-tag`.
    pub request_tag: Option<String>,
}

impl LookupRequest {
    /// Lookup without optional headers.
    pub fn new(ni: impl Into<String>) -> Self {
        Self { ni: ni.into(), signature: None, request_tag: None }
    }

    /// Send `x-signature`.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Send `x-request-tag`.
    #[must_use]
    pub fn with_request_tag(mut self, tag: impl Into<String>) -> Self {
        self.request_tag = Some(tag.into());
        self
    }
}

/// Individual taxpayer (CPF) lookup.
pub type CpfRequest = LookupRequest;

/// Company taxpayer (CNPJ) basic lookup.
pub type CnpjRequest = LookupRequest;
