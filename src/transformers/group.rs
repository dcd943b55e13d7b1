use crate::crawler::FetchedPage;
use crate::models::LinkTransformer;
use crate::{Result, SumiError};
use std::sync::Arc;

/// Applies its members in order, each to the previous member's output
///
/// Order matters: a member may rely on links already normalized by an
/// earlier one. The first failing member aborts the group and the error
/// carries its index.
#[derive(Clone, Default)]
pub struct TransformerGroup {
    transformers: Vec<Arc<dyn LinkTransformer>>,
}

impl TransformerGroup {
    pub fn new(transformers: Vec<Arc<dyn LinkTransformer>>) -> Self {
        Self { transformers }
    }

    /// Appends a transformer at the end of the pipe
    pub fn with(mut self, transformer: impl LinkTransformer + 'static) -> Self {
        self.transformers.push(Arc::new(transformer));
        self
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

impl LinkTransformer for TransformerGroup {
    fn transform_links(&self, links: Vec<String>, page: &FetchedPage) -> Result<Vec<String>> {
        let mut links = links;
        for (index, transformer) in self.transformers.iter().enumerate() {
            links = transformer
                .transform_links(links, page)
                .map_err(|e| SumiError::in_group(index, e))?;
        }
        Ok(links)
    }
}
