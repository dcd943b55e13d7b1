//! Link handlers
//!
//! Handlers consume the links the crawl reaches. Besides the logging
//! handlers this module has the combinators that gate, deduplicate, fan out
//! or decouple other handlers.

mod checked;
mod concurrent;
mod group;
mod logging;
mod unique;

pub use checked::CheckedHandler;
pub use concurrent::ConcurrentHandler;
pub use group::HandlerGroup;
pub use logging::{LoggingErrorHandler, LoggingHandler};
pub use unique::UniqueHandler;

#[cfg(test)]
pub(crate) mod testing {
    use crate::models::{LinkHandler, SourcedLink};
    use async_trait::async_trait;
    use std::sync::{Mutex, PoisonError};
    use tokio_util::sync::CancellationToken;

    /// Remembers every link it handles
    #[derive(Default)]
    pub struct RecordingHandler {
        links: Mutex<Vec<SourcedLink>>,
    }

    impl RecordingHandler {
        pub fn links(&self) -> Vec<String> {
            let links = self.links.lock().unwrap_or_else(PoisonError::into_inner);
            links.iter().map(|link| link.link.clone()).collect()
        }
    }

    #[async_trait]
    impl LinkHandler for RecordingHandler {
        async fn handle_link(&self, _token: &CancellationToken, link: &SourcedLink) {
            let mut links = self.links.lock().unwrap_or_else(PoisonError::into_inner);
            links.push(link.clone());
        }
    }
}
