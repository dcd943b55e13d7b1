use crate::models::{LinkHandler, SourcedLink};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Passes every link to all of its members concurrently
///
/// Returns once every member has handled the link.
#[derive(Clone, Default)]
pub struct HandlerGroup {
    handlers: Vec<Arc<dyn LinkHandler>>,
}

impl HandlerGroup {
    pub fn new(handlers: Vec<Arc<dyn LinkHandler>>) -> Self {
        Self { handlers }
    }

    pub fn with(mut self, handler: impl LinkHandler + 'static) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[async_trait]
impl LinkHandler for HandlerGroup {
    async fn handle_link(&self, token: &CancellationToken, link: &SourcedLink) {
        join_all(
            self.handlers
                .iter()
                .map(|handler| handler.handle_link(token, link)),
        )
        .await;
    }
}
