//! Capability traits
//!
//! Every capability receives the crawl's cancellation token so long-running
//! work (network calls, sleeps) can stop as soon as the crawl is cancelled.

use crate::crawler::FetchedPage;
use crate::models::SourcedLink;
use crate::{Result, SumiError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Produces the outbound links of a link
#[async_trait]
pub trait LinkExtractor: Send + Sync {
    /// Extracts links from the resource at `link`
    ///
    /// # Arguments
    ///
    /// * `token` - The crawl's cancellation token
    /// * `worker_id` - Identifier of the crawl worker issuing the call
    /// * `link` - The link to extract from
    async fn extract_links(
        &self,
        token: &CancellationToken,
        worker_id: usize,
        link: &str,
    ) -> Result<Vec<String>>;
}

/// Decides whether a discovered link should be followed
#[async_trait]
pub trait LinkChecker: Send + Sync {
    async fn check_link(&self, token: &CancellationToken, link: &SourcedLink) -> bool;
}

/// Consumes a link reached by the crawl
#[async_trait]
pub trait LinkHandler: Send + Sync {
    async fn handle_link(&self, token: &CancellationToken, link: &SourcedLink);
}

/// Proposes candidate sitemap links for a base link
#[async_trait]
pub trait SitemapGenerator: Send + Sync {
    async fn generate_links(&self, token: &CancellationToken, base_link: &str) -> Result<Vec<String>>;
}

/// Post-processes links extracted from a fetched page
pub trait LinkTransformer: Send + Sync {
    fn transform_links(&self, links: Vec<String>, page: &FetchedPage) -> Result<Vec<String>>;
}

/// Receives extraction failures
pub trait ErrorHandler: Send + Sync {
    fn handle_error(&self, link: &SourcedLink, error: &SumiError);
}

#[async_trait]
impl<T: LinkExtractor + ?Sized> LinkExtractor for Arc<T> {
    async fn extract_links(
        &self,
        token: &CancellationToken,
        worker_id: usize,
        link: &str,
    ) -> Result<Vec<String>> {
        (**self).extract_links(token, worker_id, link).await
    }
}

#[async_trait]
impl<T: LinkChecker + ?Sized> LinkChecker for Arc<T> {
    async fn check_link(&self, token: &CancellationToken, link: &SourcedLink) -> bool {
        (**self).check_link(token, link).await
    }
}

#[async_trait]
impl<T: LinkHandler + ?Sized> LinkHandler for Arc<T> {
    async fn handle_link(&self, token: &CancellationToken, link: &SourcedLink) {
        (**self).handle_link(token, link).await
    }
}

#[async_trait]
impl<T: SitemapGenerator + ?Sized> SitemapGenerator for Arc<T> {
    async fn generate_links(&self, token: &CancellationToken, base_link: &str) -> Result<Vec<String>> {
        (**self).generate_links(token, base_link).await
    }
}

impl<T: LinkTransformer + ?Sized> LinkTransformer for Arc<T> {
    fn transform_links(&self, links: Vec<String>, page: &FetchedPage) -> Result<Vec<String>> {
        (**self).transform_links(links, page)
    }
}

impl<T: ErrorHandler + ?Sized> ErrorHandler for Arc<T> {
    fn handle_error(&self, link: &SourcedLink, error: &SumiError) {
        (**self).handle_error(link, error)
    }
}
