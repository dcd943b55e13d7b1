//! URL handling module for Sumi-Crawler
//!
//! This module provides link sanitization (used by the deduplication
//! register) and strict parsing of crawlable HTTP(S) links.

mod normalize;

pub use normalize::sanitize_link;

use crate::UrlError;
use url::Url;

/// Parses a link and checks that it is a crawlable HTTP(S) URL with a host
///
/// # Arguments
///
/// * `link` - The link text to parse
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The link is malformed, not HTTP(S), or has no host
///
/// # Examples
///
/// ```
/// use sumi_crawler::url::parse_http_link;
///
/// let url = parse_http_link("https://example.com/page").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(parse_http_link("mailto:admin@example.com").is_err());
/// ```
pub fn parse_http_link(link: &str) -> Result<Url, UrlError> {
    let url = Url::parse(link).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Extracts the lowercase host of a link, including a non-default port
///
/// Two links share a host exactly when this function returns the same value
/// for both of them.
pub fn extract_host(link: &str) -> Result<String, UrlError> {
    let url = parse_http_link(link)?;
    let host = url
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or(UrlError::MissingDomain)?;

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}
