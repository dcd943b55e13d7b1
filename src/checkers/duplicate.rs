use crate::models::{LinkChecker, SourcedLink};
use crate::register::LinkRegister;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Accepts a link only the first time it is seen
///
/// The register may be shared with other checkers or handlers so they agree
/// on what has been seen. Links the register fails to sanitize are rejected.
#[derive(Clone)]
pub struct DuplicateChecker {
    register: Arc<LinkRegister>,
}

impl DuplicateChecker {
    pub fn new(register: Arc<LinkRegister>) -> Self {
        Self { register }
    }
}

#[async_trait]
impl LinkChecker for DuplicateChecker {
    async fn check_link(&self, _token: &CancellationToken, link: &SourcedLink) -> bool {
        match self.register.register_link(&link.link) {
            Ok(is_new) => is_new,
            Err(e) => {
                tracing::warn!("Dropping link {}: {}", link, e);
                false
            }
        }
    }
}
