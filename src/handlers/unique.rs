use crate::models::{LinkHandler, SourcedLink};
use crate::register::LinkRegister;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Passes each distinct link to the inner handler once
///
/// Links the register fails to sanitize are logged and dropped.
pub struct UniqueHandler<H> {
    register: Arc<LinkRegister>,
    handler: H,
}

impl<H: LinkHandler> UniqueHandler<H> {
    pub fn new(register: Arc<LinkRegister>, handler: H) -> Self {
        Self { register, handler }
    }
}

#[async_trait]
impl<H: LinkHandler> LinkHandler for UniqueHandler<H> {
    async fn handle_link(&self, token: &CancellationToken, link: &SourcedLink) {
        match self.register.register_link(&link.link) {
            Ok(true) => self.handler.handle_link(token, link).await,
            Ok(false) => tracing::trace!("Already handled {}", link.link),
            Err(e) => tracing::warn!("Dropping link {}: {}", link, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::RecordingHandler;
    use crate::register::SanitizeLink;

    #[tokio::test]
    async fn test_handles_each_link_once() {
        let recorder = Arc::new(RecordingHandler::default());
        let handler = UniqueHandler::new(
            Arc::new(LinkRegister::new(SanitizeLink::Yes)),
            recorder.clone(),
        );
        let token = CancellationToken::new();

        for link in [
            "http://example.com/one/test",
            "http://example.com/one/two/../test",
            "http://example.com/other",
            "not a link",
        ] {
            handler.handle_link(&token, &SourcedLink::seed(link)).await;
        }

        assert_eq!(
            recorder.links(),
            vec!["http://example.com/one/test", "http://example.com/other"]
        );
    }
}
