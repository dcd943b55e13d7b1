use crate::models::LinkExtractor;
use crate::sitemap::{SitemapDocument, SitemapRegister};
use crate::Result;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Extracts the page links listed in the sitemaps discovered for a link
///
/// Sitemap indexes are followed breadth-first, at most `max_index_depth`
/// levels deep. Candidates that cannot be loaded are skipped, since most
/// generated candidates do not exist; only a failed discovery is an error.
#[derive(Clone)]
pub struct SitemapExtractor {
    register: Arc<SitemapRegister>,
    max_index_depth: usize,
}

impl SitemapExtractor {
    pub fn new(register: Arc<SitemapRegister>, max_index_depth: usize) -> Self {
        Self {
            register,
            max_index_depth,
        }
    }
}

#[async_trait]
impl LinkExtractor for SitemapExtractor {
    async fn extract_links(
        &self,
        token: &CancellationToken,
        _worker_id: usize,
        link: &str,
    ) -> Result<Vec<String>> {
        let candidates = self.register.discover(token, link).await?;

        let mut pending: VecDeque<(String, usize)> =
            candidates.iter().map(|candidate| (candidate.clone(), 0)).collect();
        let mut visited = HashSet::new();
        let mut links = Vec::new();

        while let Some((sitemap_link, depth)) = pending.pop_front() {
            if !visited.insert(sitemap_link.clone()) {
                continue;
            }

            let document = match self.register.load(token, &sitemap_link).await {
                Ok(document) => document,
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    tracing::debug!("Skipping sitemap {}: {}", sitemap_link, e);
                    continue;
                }
            };

            match document.as_ref() {
                SitemapDocument::UrlSet(pages) => links.extend(pages.iter().cloned()),
                SitemapDocument::Index(children) if depth < self.max_index_depth => {
                    pending.extend(children.iter().map(|child| (child.clone(), depth + 1)));
                }
                SitemapDocument::Index(_) => {
                    tracing::debug!(
                        "Not following sitemap index {} beyond depth {}",
                        sitemap_link,
                        self.max_index_depth
                    );
                }
            }
        }

        Ok(links)
    }
}
