//! HTTP fetcher implementation
//!
//! This module handles the HTTP side of the crawler:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests returning the page body together with its response metadata
//! - Error classification (transport failures vs. unexpected statuses)

use crate::config::{HttpConfig, UserAgentConfig};
use crate::{Result, SumiError};
use reqwest::Client;
use std::time::Duration;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The link that was requested
    pub link: String,

    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Page body
    pub body: String,
}

impl FetchedPage {
    /// Creates a page that was served without redirects
    pub fn new(link: impl Into<String>, body: impl Into<String>) -> Self {
        let link = link.into();
        Self {
            final_url: link.clone(),
            link,
            status_code: 200,
            content_type: "text/html".to_string(),
            body: body.into(),
        }
    }

    /// Returns true if the Content-Type announces HTML or XHTML
    pub fn is_html(&self) -> bool {
        self.content_type.is_empty()
            || self.content_type.contains("text/html")
            || self.content_type.contains("application/xhtml+xml")
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Timeouts for the transport
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_crawler::config::{HttpConfig, UserAgentConfig};
/// use sumi_crawler::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "SumiCrawler".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a link and returns its body
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Transport failure (DNS, connect, timeout, TLS) | `SumiError::Http` |
/// | Non-2xx status after redirects | `SumiError::HttpStatus` |
/// | Body cannot be read | `SumiError::Http` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `link` - The link to fetch
pub async fn fetch_page(client: &Client, link: &str) -> Result<FetchedPage> {
    let response = client
        .get(link)
        .send()
        .await
        .map_err(|source| SumiError::Http {
            url: link.to_string(),
            source,
        })?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(SumiError::HttpStatus {
            url: link.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = response.text().await.map_err(|source| SumiError::Http {
        url: link.to_string(),
        source,
    })?;

    tracing::trace!(
        "Fetched {} ({} bytes, status {})",
        final_url,
        body.len(),
        status
    );

    Ok(FetchedPage {
        link: link.to_string(),
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}
