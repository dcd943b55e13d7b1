use crate::crawler::fetch_page;
use crate::models::SitemapGenerator;
use crate::register::BasicRegister;
use crate::sitemap::{parse_sitemap, SitemapDocument};
use crate::{Result, SumiError};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Caches sitemap candidates per base link and parsed sitemaps per link
///
/// Both caches are single-flight: concurrent lookups for the same key share
/// one generation or download. Failures are not cached.
pub struct SitemapRegister {
    generator: Arc<dyn SitemapGenerator>,
    client: Client,
    discovered: BasicRegister<String, Arc<Vec<String>>>,
    documents: BasicRegister<String, Arc<SitemapDocument>>,
}

impl SitemapRegister {
    pub fn new(client: Client, generator: Arc<dyn SitemapGenerator>) -> Self {
        Self {
            generator,
            client,
            discovered: BasicRegister::new(),
            documents: BasicRegister::new(),
        }
    }

    /// Returns the candidate sitemap links for `base_link`
    pub async fn discover(&self, token: &CancellationToken, base_link: &str) -> Result<Arc<Vec<String>>> {
        let lookup = self.discovered.register(base_link.to_string(), || async {
            let links = self.generator.generate_links(token, base_link).await?;
            tracing::debug!("Found {} sitemap candidates for {}", links.len(), base_link);
            Ok(Arc::new(links))
        });

        cancellable(token, lookup).await
    }

    /// Downloads and parses the sitemap at `sitemap_link`
    pub async fn load(&self, token: &CancellationToken, sitemap_link: &str) -> Result<Arc<SitemapDocument>> {
        let lookup = self.documents.register(sitemap_link.to_string(), || async {
            let page = fetch_page(&self.client, sitemap_link).await?;
            let document = parse_sitemap(&page.body)?;
            tracing::debug!("Loaded sitemap {} ({} links)", sitemap_link, document.links().len());
            Ok(Arc::new(document))
        });

        cancellable(token, lookup).await
    }
}

async fn cancellable<T>(token: &CancellationToken, lookup: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(SumiError::Cancelled),
        result = lookup => result,
    }
}
