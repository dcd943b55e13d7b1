use crate::models::{ErrorHandler, LinkHandler, SourcedLink};
use crate::SumiError;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Logs every handled link at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

#[async_trait]
impl LinkHandler for LoggingHandler {
    async fn handle_link(&self, _token: &CancellationToken, link: &SourcedLink) {
        if link.is_seed() {
            tracing::info!("Crawled {}", link.link);
        } else {
            tracing::info!("Crawled {} (linked from {})", link.link, link.source_link);
        }
    }
}

/// Logs extraction failures
///
/// Cancellations are expected while a crawl winds down and are only logged
/// at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingErrorHandler;

impl ErrorHandler for LoggingErrorHandler {
    fn handle_error(&self, link: &SourcedLink, error: &SumiError) {
        if error.is_cancelled() {
            tracing::debug!("Extraction from {} cancelled", link.link);
        } else {
            tracing::warn!("Failed to extract links from {}: {}", link, error);
        }
    }
}
