use crate::models::SitemapGenerator;
use crate::{Result, SumiError};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Runs its members concurrently and concatenates their candidates
///
/// The first failing member fails the group; the error carries its index.
#[derive(Clone, Default)]
pub struct GeneratorGroup {
    generators: Vec<Arc<dyn SitemapGenerator>>,
}

impl GeneratorGroup {
    pub fn new(generators: Vec<Arc<dyn SitemapGenerator>>) -> Self {
        Self { generators }
    }

    pub fn with(mut self, generator: impl SitemapGenerator + 'static) -> Self {
        self.generators.push(Arc::new(generator));
        self
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

#[async_trait]
impl SitemapGenerator for GeneratorGroup {
    async fn generate_links(&self, token: &CancellationToken, base_link: &str) -> Result<Vec<String>> {
        let generations = self
            .generators
            .iter()
            .enumerate()
            .map(|(index, generator)| async move {
                generator
                    .generate_links(token, base_link)
                    .await
                    .map_err(|e| SumiError::in_group(index, e))
            });

        let results = try_join_all(generations).await?;
        Ok(results.into_iter().flatten().collect())
    }
}
