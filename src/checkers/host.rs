use crate::models::{LinkChecker, SourcedLink};
use crate::url::extract_host;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Accepts only links on the same host (and port) as their source link
#[derive(Debug, Clone, Copy, Default)]
pub struct HostChecker;

#[async_trait]
impl LinkChecker for HostChecker {
    async fn check_link(&self, _token: &CancellationToken, link: &SourcedLink) -> bool {
        match (extract_host(&link.source_link), extract_host(&link.link)) {
            (Ok(source_host), Ok(host)) => source_host == host,
            (Err(e), _) | (_, Err(e)) => {
                tracing::debug!("Rejecting {}: {}", link, e);
                false
            }
        }
    }
}
