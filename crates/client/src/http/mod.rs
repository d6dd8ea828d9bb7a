//! HTTP plumbing: the transport seam, its reqwest implementation and
//! endpoint URL construction.

pub mod client;
pub mod transport;

pub use client::{HttpClient, HttpClientBuilder};
use serpro_domain::{Result, SerproError};
pub use transport::{HttpRequest, HttpResponse, Transport};
use url::Url;

use crate::errors::ClientError;

/// Parse and check a gateway base URL.
///
/// # Errors
/// `SerproError::Config` if the URL does not parse or cannot carry a path.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url).map_err(ClientError::from)?;
    if url.cannot_be_a_base() {
        return Err(SerproError::Config(format!("base URL cannot carry a path: {base_url}")));
    }
    Ok(url)
}

/// Append path segments to the base URL. Each segment is percent-encoded, so
/// identifiers interpolated into the path stay a single segment.
pub fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| SerproError::Config(format!("base URL cannot carry a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
