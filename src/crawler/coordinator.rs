//! Crawler coordinator - the self-feeding crawl loop
//!
//! A fixed pool of workers drains a shared queue of links. For every link a
//! worker:
//! 1. Passes the link to the handler
//! 2. Extracts the link's outbound links
//! 3. Checks every extracted link against the checker
//! 4. Counts the accepted links, queues them, then marks its own link done
//!
//! The crawl is over when the completion counter drops to zero, or when the
//! cancellation token fires.

use crate::crawler::scheduler::{CompletionCounter, WorkQueue};
use crate::models::{ErrorHandler, LinkChecker, LinkExtractor, LinkHandler, SourcedLink};
use crate::SumiError;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// The capabilities a crawl is built from
#[derive(Clone)]
pub struct CrawlDependencies {
    pub extractor: Arc<dyn LinkExtractor>,
    pub checker: Arc<dyn LinkChecker>,
    pub handler: Arc<dyn LinkHandler>,
    pub error_handler: Arc<dyn ErrorHandler>,
}

/// State shared by the workers of one crawl
struct CrawlState {
    queue: WorkQueue<SourcedLink>,
    counter: CompletionCounter,
    dependencies: CrawlDependencies,
}

/// Crawls from the seed links until no link is left or the token is cancelled
///
/// Every reachable link (subject to the checker) is handled exactly once per
/// time it is accepted; deduplication is the checker's concern.
///
/// # Arguments
///
/// * `token` - Cancelling it stops the crawl; in-flight extractions fail fast
/// * `concurrency` - Number of workers (at least one is always started)
/// * `seeds` - Links the crawl starts from
/// * `dependencies` - The extractor, checker, handler and error handler
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use sumi_crawler::checkers::{CheckerGroup, DuplicateChecker, HostChecker};
/// use sumi_crawler::crawler::{crawl, CrawlDependencies};
/// use sumi_crawler::extractors::HtmlExtractor;
/// use sumi_crawler::handlers::{LoggingErrorHandler, LoggingHandler};
/// use sumi_crawler::register::{LinkRegister, SanitizeLink};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() {
/// let register = Arc::new(LinkRegister::new(SanitizeLink::Yes));
/// let dependencies = CrawlDependencies {
///     extractor: Arc::new(HtmlExtractor::new(reqwest::Client::new())),
///     checker: Arc::new(
///         CheckerGroup::default()
///             .with(HostChecker)
///             .with(DuplicateChecker::new(register)),
///     ),
///     handler: Arc::new(LoggingHandler),
///     error_handler: Arc::new(LoggingErrorHandler),
/// };
///
/// let token = CancellationToken::new();
/// crawl(&token, 4, vec!["https://example.com/".to_string()], dependencies).await;
/// # }
/// ```
pub async fn crawl(
    token: &CancellationToken,
    concurrency: usize,
    seeds: Vec<String>,
    dependencies: CrawlDependencies,
) {
    if seeds.is_empty() {
        tracing::info!("No seed links, nothing to crawl");
        return;
    }

    let concurrency = concurrency.max(1);
    let state = Arc::new(CrawlState {
        queue: WorkQueue::with_capacity(seeds.len()),
        counter: CompletionCounter::new(),
        dependencies,
    });

    tracing::info!(
        "Starting crawl with {} seed links and {} workers",
        seeds.len(),
        concurrency
    );

    state.counter.add(seeds.len());
    state.queue.push_all(seeds.into_iter().map(SourcedLink::seed));

    let mut workers = JoinSet::new();
    for worker_id in 0..concurrency {
        let state = Arc::clone(&state);
        let token = token.clone();
        workers.spawn(async move { run_worker(worker_id, &state, &token).await });
    }

    tokio::select! {
        _ = state.counter.wait() => {
            tracing::info!("All links processed, crawl complete");
        }
        _ = token.cancelled() => {
            tracing::info!(
                "Crawl cancelled with {} links pending",
                state.counter.pending()
            );
        }
    }

    state.queue.close();
    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            tracing::error!("Crawl worker failed: {}", e);
        }
    }
}

/// Pops and processes links until the queue is closed or the crawl cancelled
async fn run_worker(worker_id: usize, state: &CrawlState, token: &CancellationToken) {
    tracing::trace!("Worker {} started", worker_id);

    loop {
        let link = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            link = state.queue.pop() => match link {
                Some(link) => link,
                None => break,
            },
        };

        process_link(worker_id, state, token, link).await;
    }

    tracing::trace!("Worker {} stopped", worker_id);
}

/// Processes one link: handle, extract, check, then requeue the accepted links
async fn process_link(
    worker_id: usize,
    state: &CrawlState,
    token: &CancellationToken,
    link: SourcedLink,
) {
    let dependencies = &state.dependencies;
    tracing::debug!("Worker {} processing {}", worker_id, link.link);

    dependencies.handler.handle_link(token, &link).await;

    let extracted = tokio::select! {
        biased;
        _ = token.cancelled() => Err(SumiError::Cancelled),
        result = dependencies.extractor.extract_links(token, worker_id, &link.link) => result,
    };

    let extracted = match extracted {
        Ok(extracted) => extracted,
        Err(e) => {
            dependencies.error_handler.handle_error(&link, &e);
            state.counter.done();
            return;
        }
    };

    let mut accepted = Vec::with_capacity(extracted.len());
    for extracted_link in extracted {
        let candidate = SourcedLink::new(link.link.clone(), extracted_link);
        if dependencies.checker.check_link(token, &candidate).await {
            accepted.push(candidate);
        }
    }

    tracing::debug!(
        "Worker {} accepted {} links from {}",
        worker_id,
        accepted.len(),
        link.link
    );

    // Count the follow-ups before queueing them and before finishing this link
    state.counter.add(accepted.len());
    state.queue.push_all(accepted);
    state.counter.done();
}
