use crate::models::LinkExtractor;
use crate::{Result, SumiError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Enforces a minimal delay between two extractions of the same worker
///
/// Each worker is tracked separately, so with N workers the crawl issues at
/// most N extractions per `minimal_delay`.
pub struct DelayingExtractor<E> {
    inner: E,
    minimal_delay: Duration,
    last_calls: Mutex<HashMap<usize, Instant>>,
}

impl<E: LinkExtractor> DelayingExtractor<E> {
    pub fn new(inner: E, minimal_delay: Duration) -> Self {
        Self {
            inner,
            minimal_delay,
            last_calls: Mutex::new(HashMap::new()),
        }
    }

    /// Time the worker still has to wait before its next extraction
    fn remaining_delay(&self, worker_id: usize) -> Duration {
        let last_calls = self.last_calls.lock().unwrap_or_else(PoisonError::into_inner);
        last_calls
            .get(&worker_id)
            .map(|last_call| self.minimal_delay.saturating_sub(last_call.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    fn record_call(&self, worker_id: usize) {
        let mut last_calls = self.last_calls.lock().unwrap_or_else(PoisonError::into_inner);
        last_calls.insert(worker_id, Instant::now());
    }
}

#[async_trait]
impl<E: LinkExtractor> LinkExtractor for DelayingExtractor<E> {
    async fn extract_links(
        &self,
        token: &CancellationToken,
        worker_id: usize,
        link: &str,
    ) -> Result<Vec<String>> {
        let delay = self.remaining_delay(worker_id);
        if !delay.is_zero() {
            tracing::trace!("Worker {} waits {:?} before {}", worker_id, delay, link);
            tokio::select! {
                _ = token.cancelled() => return Err(SumiError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        self.record_call(worker_id);
        self.inner.extract_links(token, worker_id, link).await
    }
}
