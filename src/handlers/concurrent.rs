use crate::models::{LinkHandler, SourcedLink};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

/// Decouples a slow handler from the crawl workers
///
/// Handling a link only queues it on an unbounded channel. The queued links
/// are handled by the pool started with [`ConcurrentHandler::run`], which
/// drains the channel until [`ConcurrentHandler::stop`] is called (or the
/// token is cancelled).
pub struct ConcurrentHandler {
    handler: Arc<dyn LinkHandler>,
    sender: Mutex<Option<UnboundedSender<SourcedLink>>>,
    receiver: tokio::sync::Mutex<UnboundedReceiver<SourcedLink>>,
}

impl ConcurrentHandler {
    pub fn new(handler: Arc<dyn LinkHandler>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            handler,
            sender: Mutex::new(Some(sender)),
            receiver: tokio::sync::Mutex::new(receiver),
        }
    }

    /// Handles queued links with `concurrency` workers
    ///
    /// Returns once the handler was stopped and every queued link handled,
    /// or as soon as the token is cancelled.
    pub async fn run(&self, token: &CancellationToken, concurrency: usize) {
        let workers = (0..concurrency.max(1)).map(|worker_id| self.run_worker(token, worker_id));
        join_all(workers).await;
        tracing::debug!("Concurrent handler finished");
    }

    /// Stops accepting links; `run` returns once the queue is drained
    pub fn stop(&self) {
        let mut sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        sender.take();
    }

    async fn run_worker(&self, token: &CancellationToken, worker_id: usize) {
        loop {
            let next = {
                let mut receiver = self.receiver.lock().await;
                tokio::select! {
                    biased;
                    _ = token.cancelled() => None,
                    link = receiver.recv() => link,
                }
            };

            let Some(link) = next else {
                tracing::trace!("Handler worker {} stopping", worker_id);
                break;
            };
            self.handler.handle_link(token, &link).await;
        }
    }
}

#[async_trait]
impl LinkHandler for ConcurrentHandler {
    async fn handle_link(&self, _token: &CancellationToken, link: &SourcedLink) {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let queued = sender
            .as_ref()
            .map(|sender| sender.send(link.clone()).is_ok())
            .unwrap_or(false);

        if !queued {
            tracing::debug!("Handler stopped, dropping {}", link.link);
        }
    }
}
