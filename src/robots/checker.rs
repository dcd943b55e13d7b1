use crate::models::{LinkChecker, SourcedLink};
use crate::robots::RobotsRegister;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Accepts links that robots.txt allows for the crawler's user agent
///
/// When the rules cannot be obtained the link is rejected and a warning is
/// logged.
#[derive(Clone)]
pub struct RobotsChecker {
    register: Arc<RobotsRegister>,
    user_agent: String,
}

impl RobotsChecker {
    /// Creates a checker for the given product token (e.g. "SumiCrawler")
    pub fn new(register: Arc<RobotsRegister>, user_agent: impl Into<String>) -> Self {
        Self {
            register,
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl LinkChecker for RobotsChecker {
    async fn check_link(&self, token: &CancellationToken, link: &SourcedLink) -> bool {
        match self.register.get(token, &link.link).await {
            Ok(robots) => {
                let allowed = robots.is_allowed(&link.link, &self.user_agent);
                if !allowed {
                    tracing::debug!("{} is disallowed by robots.txt", link.link);
                }
                allowed
            }
            Err(e) if e.is_cancelled() => false,
            Err(e) => {
                tracing::warn!("Rejecting {}, robots.txt is unavailable: {}", link.link, e);
                false
            }
        }
    }
}
