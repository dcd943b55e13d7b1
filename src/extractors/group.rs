use crate::models::LinkExtractor;
use crate::{Result, SumiError};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Runs its members concurrently and concatenates their links
///
/// Links keep member order, then each member's own order. If any member
/// fails the whole group fails, and the error carries the member's index.
#[derive(Clone, Default)]
pub struct ExtractorGroup {
    extractors: Vec<Arc<dyn LinkExtractor>>,
}

impl ExtractorGroup {
    pub fn new(extractors: Vec<Arc<dyn LinkExtractor>>) -> Self {
        Self { extractors }
    }

    pub fn with(mut self, extractor: impl LinkExtractor + 'static) -> Self {
        self.extractors.push(Arc::new(extractor));
        self
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

#[async_trait]
impl LinkExtractor for ExtractorGroup {
    async fn extract_links(
        &self,
        token: &CancellationToken,
        worker_id: usize,
        link: &str,
    ) -> Result<Vec<String>> {
        let extractions = self
            .extractors
            .iter()
            .enumerate()
            .map(|(index, extractor)| async move {
                extractor
                    .extract_links(token, worker_id, link)
                    .await
                    .map_err(|e| SumiError::in_group(index, e))
            });

        let results = try_join_all(extractions).await?;
        Ok(results.into_iter().flatten().collect())
    }
}
