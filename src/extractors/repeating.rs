use crate::models::LinkExtractor;
use crate::{Result, SumiError};
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Retries a failing extractor a fixed number of times with a fixed delay
///
/// Cancellation is never retried.
pub struct RepeatingExtractor<E> {
    inner: E,
    repeat_count: u32,
    repeat_delay: Duration,
}

impl<E: LinkExtractor> RepeatingExtractor<E> {
    /// Wraps `inner`, allowing up to `repeat_count` attempts per link
    pub fn new(inner: E, repeat_count: u32, repeat_delay: Duration) -> Self {
        Self {
            inner,
            repeat_count: repeat_count.max(1),
            repeat_delay,
        }
    }
}

#[async_trait]
impl<E: LinkExtractor> LinkExtractor for RepeatingExtractor<E> {
    async fn extract_links(
        &self,
        token: &CancellationToken,
        worker_id: usize,
        link: &str,
    ) -> Result<Vec<String>> {
        let mut attempt = 1;
        loop {
            let error = match self.inner.extract_links(token, worker_id, link).await {
                Ok(links) => return Ok(links),
                Err(e) => e,
            };

            if error.is_cancelled() || attempt >= self.repeat_count {
                return Err(error);
            }

            tracing::warn!(
                "Attempt {}/{} to extract links from {} failed: {}",
                attempt,
                self.repeat_count,
                link,
                error
            );

            tokio::select! {
                _ = token.cancelled() => return Err(SumiError::Cancelled),
                _ = tokio::time::sleep(self.repeat_delay) => {}
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails until it has been called `failures` times
    struct Flaky {
        failures: u32,
        calls: AtomicU32,
    }

    impl Flaky {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl LinkExtractor for Flaky {
        async fn extract_links(
            &self,
            _token: &CancellationToken,
            _worker_id: usize,
            link: &str,
        ) -> Result<Vec<String>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(SumiError::HttpStatus {
                    url: link.to_string(),
                    status: 503,
                })
            } else {
                Ok(vec![format!("{}next", link)])
            }
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_retries() {
        let extractor = RepeatingExtractor::new(Flaky::new(2), 3, Duration::from_millis(1));
        let links = extractor
            .extract_links(&CancellationToken::new(), 0, "http://x/")
            .await
            .unwrap();

        assert_eq!(links, vec!["http://x/next"]);
        assert_eq!(extractor.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_repeat_count() {
        let extractor = RepeatingExtractor::new(Flaky::new(5), 3, Duration::from_millis(1));
        let result = extractor
            .extract_links(&CancellationToken::new(), 0, "http://x/")
            .await;

        assert!(matches!(
            result.unwrap_err(),
            SumiError::HttpStatus { status: 503, .. }
        ));
        assert_eq!(extractor.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_repeat_count_means_one_attempt() {
        let extractor = RepeatingExtractor::new(Flaky::new(1), 0, Duration::from_millis(1));
        let result = extractor
            .extract_links(&CancellationToken::new(), 0, "http://x/")
            .await;

        assert!(result.is_err());
        assert_eq!(extractor.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_the_delay() {
        let token = CancellationToken::new();
        let extractor = RepeatingExtractor::new(Flaky::new(5), 3, Duration::from_secs(60));

        let canceller = {
            let token = token.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                token.cancel();
            })
        };

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            extractor.extract_links(&token, 0, "http://x/"),
        )
        .await
        .unwrap();
        canceller.await.unwrap();

        assert!(result.unwrap_err().is_cancelled());
        assert_eq!(extractor.inner.calls.load(Ordering::SeqCst), 1);
    }
}
