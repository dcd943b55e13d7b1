//! Work queue and completion tracking for the crawl workers
//!
//! This module handles:
//! - The shared, unbounded queue that workers both consume from and feed
//! - The completion counter that tells when no link is pending or in progress
//!
//! Workers push discovered links back into the queue they pop from, so a
//! bounded queue could fill up while every worker is blocked pushing. The
//! queue therefore never blocks on push; only pop waits.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::{Notify, Semaphore};

/// Unbounded multi-producer, multi-consumer FIFO queue
///
/// Items live in a deque; a semaphore holds one permit per queued item so
/// that `pop` can wait without polling.
pub struct WorkQueue<T> {
    items: Mutex<VecDeque<T>>,
    available: Semaphore,
}

impl<T> WorkQueue<T> {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with room for `capacity` items before growing
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            available: Semaphore::new(0),
        }
    }

    /// Appends an item at the tail of the queue
    pub fn push(&self, item: T) {
        self.lock().push_back(item);
        self.available.add_permits(1);
    }

    /// Appends all items at the tail of the queue, keeping their order
    pub fn push_all(&self, items: impl IntoIterator<Item = T>) {
        let added = {
            let mut queue = self.lock();
            let before = queue.len();
            queue.extend(items);
            queue.len() - before
        };

        if added > 0 {
            self.available.add_permits(added);
        }
    }

    /// Removes the item at the head of the queue, waiting for one if empty
    ///
    /// # Returns
    ///
    /// * `Some(T)` - The oldest queued item
    /// * `None` - The queue was closed
    pub async fn pop(&self) -> Option<T> {
        let permit = self.available.acquire().await.ok()?;
        permit.forget();
        self.lock().pop_front()
    }

    /// Closes the queue; every current and future `pop` returns `None`
    pub fn close(&self) {
        self.available.close();
    }

    /// Returns whether the queue was closed
    pub fn is_closed(&self) -> bool {
        self.available.is_closed()
    }

    /// Returns the number of queued items
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts links that are queued or being processed
///
/// A producer must call [`CompletionCounter::add`] for the links it is about
/// to queue *before* calling [`CompletionCounter::done`] for the link it just
/// finished; otherwise the count can touch zero while work is still coming.
#[derive(Default)]
pub struct CompletionCounter {
    pending: Mutex<usize>,
    zero: Notify,
}

impl CompletionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` pending links
    pub fn add(&self, count: usize) {
        if count == 0 {
            return;
        }

        let mut pending = self.lock();
        *pending += count;
    }

    /// Marks one pending link as finished
    ///
    /// # Panics
    ///
    /// Panics if no link is pending, which means `done` was called more
    /// often than links were added.
    pub fn done(&self) {
        let mut pending = self.lock();
        *pending = pending
            .checked_sub(1)
            .unwrap_or_else(|| panic!("CompletionCounter::done called with no pending link"));

        if *pending == 0 {
            self.zero.notify_waiters();
        }
    }

    /// Returns the number of pending links
    pub fn pending(&self) -> usize {
        *self.lock()
    }

    /// Waits until no link is pending
    pub async fn wait(&self) {
        loop {
            // Registered before the check so a concurrent notify is not lost
            let notified = self.zero.notified();
            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_new_queue() {
        let queue = WorkQueue::<u32>::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(!queue.is_closed());
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = WorkQueue::new();
        queue.push(1);
        queue.push_all(vec![2, 3]);
        queue.push(4);

        assert_eq!(queue.len(), 4);
        for expected in 1..=4 {
            assert_eq!(queue.pop().await, Some(expected));
        }
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_push_never_blocks_past_initial_capacity() {
        let queue = WorkQueue::with_capacity(1);
        queue.push_all(0..10_000);
        assert_eq!(queue.len(), 10_000);
    }

    #[tokio::test]
    async fn test_pop_waits_for_push() {
        let queue = Arc::new(WorkQueue::new());

        let consumer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.pop().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!consumer.is_finished());

        queue.push("link");
        assert_eq!(consumer.await.unwrap(), Some("link"));
    }

    #[tokio::test]
    async fn test_close_wakes_waiting_consumers() {
        let queue = Arc::new(WorkQueue::<u32>::new());

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                tokio::spawn(async move { queue.pop().await })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        queue.close();

        for consumer in consumers {
            assert_eq!(consumer.await.unwrap(), None);
        }
        assert!(queue.is_closed());
    }

    #[tokio::test]
    async fn test_counter_starts_at_zero() {
        let counter = CompletionCounter::new();
        assert_eq!(counter.pending(), 0);

        // Nothing pending, so waiting returns immediately
        tokio::time::timeout(Duration::from_millis(100), counter.wait())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_counter_wait_returns_at_zero() {
        let counter = Arc::new(CompletionCounter::new());
        counter.add(2);

        let waiter = {
            let counter = Arc::clone(&counter);
            tokio::spawn(async move { counter.wait().await })
        };

        counter.done();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        counter.done();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(counter.pending(), 0);
    }

    #[tokio::test]
    async fn test_add_before_done_keeps_counter_positive() {
        let counter = CompletionCounter::new();
        counter.add(1);

        // A processed link yielding two follow-ups
        counter.add(2);
        counter.done();
        assert_eq!(counter.pending(), 2);

        counter.done();
        counter.done();
        assert_eq!(counter.pending(), 0);
    }

    #[test]
    #[should_panic(expected = "no pending link")]
    fn test_done_without_add_panics() {
        let counter = CompletionCounter::new();
        counter.done();
    }
}
