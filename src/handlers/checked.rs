use crate::models::{LinkChecker, LinkHandler, SourcedLink};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Passes a link to the inner handler only if the checker accepts it
///
/// Rejected links are dropped silently; the checker is expected to log why.
pub struct CheckedHandler<C, H> {
    checker: C,
    handler: H,
}

impl<C: LinkChecker, H: LinkHandler> CheckedHandler<C, H> {
    pub fn new(checker: C, handler: H) -> Self {
        Self { checker, handler }
    }
}

#[async_trait]
impl<C: LinkChecker, H: LinkHandler> LinkHandler for CheckedHandler<C, H> {
    async fn handle_link(&self, token: &CancellationToken, link: &SourcedLink) {
        if self.checker.check_link(token, link).await {
            self.handler.handle_link(token, link).await;
        }
    }
}
