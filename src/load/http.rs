#![cfg(feature = "http")]

//! Fetching remote sources.

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::debug;

use crate::error::LoadResult;

/// Download the body of `url`.
///
/// Any status outside `2xx` is an error; the body of such a response is not parsed.
pub fn fetch_bytes(client: &Client, url: Url) -> LoadResult<Vec<u8>> {
    debug!(%url, "fetching source");
    let response = client.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;
    debug!(bytes = bytes.len(), "fetched source");
    Ok(bytes.to_vec())
}
