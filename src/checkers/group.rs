use crate::models::{LinkChecker, SourcedLink};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Accepts a link only if all of its members accept it
///
/// Members are asked in order and the first rejection short-circuits. An
/// empty group rejects every link.
#[derive(Clone, Default)]
pub struct CheckerGroup {
    checkers: Vec<Arc<dyn LinkChecker>>,
}

impl CheckerGroup {
    pub fn new(checkers: Vec<Arc<dyn LinkChecker>>) -> Self {
        Self { checkers }
    }

    pub fn with(mut self, checker: impl LinkChecker + 'static) -> Self {
        self.checkers.push(Arc::new(checker));
        self
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

#[async_trait]
impl LinkChecker for CheckerGroup {
    async fn check_link(&self, token: &CancellationToken, link: &SourcedLink) -> bool {
        if self.checkers.is_empty() {
            return false;
        }

        for checker in &self.checkers {
            if !checker.check_link(token, link).await {
                return false;
            }
        }
        true
    }
}
