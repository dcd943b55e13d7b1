use crate::models::LinkExtractor;
use crate::transformers::trim_links;
use crate::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Trims whitespace from the links of the wrapped extractor
pub struct TrimmingExtractor<E> {
    inner: E,
}

impl<E: LinkExtractor> TrimmingExtractor<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<E: LinkExtractor> LinkExtractor for TrimmingExtractor<E> {
    async fn extract_links(
        &self,
        token: &CancellationToken,
        worker_id: usize,
        link: &str,
    ) -> Result<Vec<String>> {
        let links = self.inner.extract_links(token, worker_id, link).await?;
        Ok(trim_links(links))
    }
}
