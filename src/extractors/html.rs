use crate::crawler::fetch_page;
use crate::html::{select_attributes, TagFilter};
use crate::models::{LinkExtractor, LinkTransformer};
use crate::transformers::{ResolvingTransformer, TransformerGroup, TrimmingTransformer};
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Fetches a page and extracts the links selected by its tag filter
///
/// The selected attribute values are passed through the transformer, which
/// by default trims them and resolves them into absolute HTTP(S) links.
/// Pages that are not HTML yield no links.
#[derive(Clone)]
pub struct HtmlExtractor {
    client: Client,
    filter: TagFilter,
    transformer: Arc<dyn LinkTransformer>,
}

impl HtmlExtractor {
    pub fn new(client: Client) -> Self {
        let transformer = TransformerGroup::default()
            .with(TrimmingTransformer)
            .with(ResolvingTransformer);

        Self {
            client,
            filter: TagFilter::hyperlinks(),
            transformer: Arc::new(transformer),
        }
    }

    /// Replaces the tag filter
    pub fn with_filter(mut self, filter: TagFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replaces the transformer applied to the selected values
    pub fn with_transformer(mut self, transformer: impl LinkTransformer + 'static) -> Self {
        self.transformer = Arc::new(transformer);
        self
    }
}

#[async_trait]
impl LinkExtractor for HtmlExtractor {
    async fn extract_links(
        &self,
        _token: &CancellationToken,
        _worker_id: usize,
        link: &str,
    ) -> Result<Vec<String>> {
        let page = fetch_page(&self.client, link).await?;

        if !page.is_html() {
            tracing::debug!(
                "Skipping link extraction for {}: content type {}",
                link,
                page.content_type
            );
            return Ok(Vec::new());
        }

        let values = select_attributes(&page.body, &self.filter);
        self.transformer.transform_links(values, &page)
    }
}
