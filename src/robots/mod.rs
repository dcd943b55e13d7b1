//! Robots.txt handling module
//!
//! robots.txt files are fetched once per site through a [`RobotsRegister`]
//! and consulted by the [`RobotsChecker`]. Anything that prevents a verdict
//! (a server error, a network failure) rejects the link.

mod checker;
mod parser;
mod register;

pub use checker::RobotsChecker;
pub use parser::ParsedRobots;
pub use register::RobotsRegister;

use crate::url::parse_http_link;
use crate::{Result, SumiError};
use reqwest::Client;
use url::Url;

/// Returns the robots.txt link governing `link`
///
/// The result keeps the scheme, user info, host and port of `link`, with the
/// path `/robots.txt` and no query or fragment.
///
/// # Examples
///
/// ```
/// use sumi_crawler::robots::robots_txt_link;
///
/// let robots = robots_txt_link("https://example.com:8080/a/b?c=d#e").unwrap();
/// assert_eq!(robots.as_str(), "https://example.com:8080/robots.txt");
/// ```
pub fn robots_txt_link(link: &str) -> Result<Url> {
    let mut url = parse_http_link(link)?;
    url.set_path("/robots.txt");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Fetches and parses a robots.txt file
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - The parsed file on a 2xx response, or a policy
///   that allows everything on a 4xx response (the site publishes no rules)
/// * `Err(SumiError)` - A transport failure or any other status
pub async fn fetch_robots(client: &Client, robots_link: &Url) -> Result<ParsedRobots> {
    tracing::debug!("Fetching {}", robots_link);

    let response = client
        .get(robots_link.clone())
        .send()
        .await
        .map_err(|source| SumiError::Http {
            url: robots_link.to_string(),
            source,
        })?;

    let status = response.status();
    if status.is_success() {
        let content = response.text().await.map_err(|source| SumiError::Http {
            url: robots_link.to_string(),
            source,
        })?;
        Ok(ParsedRobots::from_content(&content))
    } else if status.is_client_error() {
        tracing::debug!("{} returned {}, allowing everything", robots_link, status);
        Ok(ParsedRobots::allow_all())
    } else {
        Err(SumiError::Robots(format!(
            "{} returned status {}",
            robots_link,
            status.as_u16()
        )))
    }
}
