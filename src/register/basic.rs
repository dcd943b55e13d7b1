//! Single-flight memoizing register
//!
//! A computation registered for a key runs at most once at a time. Callers
//! that arrive while it is in flight wait for it and receive the same result.
//! Successful results are cached for the lifetime of the register; a failure
//! is handed to every caller that joined that flight and then evicted, so the
//! next call for the key computes again.

use crate::{Result, SumiError};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;

type Slot<V> = Arc<OnceCell<std::result::Result<V, Arc<SumiError>>>>;

/// Keyed single-flight cache
pub struct BasicRegister<K, V> {
    entries: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> BasicRegister<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the value for `key`, running `compute` only if no value is
    /// cached and no computation for the key is in flight
    ///
    /// # Arguments
    ///
    /// * `key` - The lookup key
    /// * `compute` - Produces the value on a cache miss
    ///
    /// # Returns
    ///
    /// * `Ok(V)` - The cached or freshly computed value
    /// * `Err(SumiError::Shared)` - The computation this call joined failed
    pub async fn register<F, Fut>(&self, key: K, compute: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(entries.entry(key.clone()).or_default())
        };

        let outcome = slot
            .get_or_init(|| async move {
                compute().await.map_err(|error| match error {
                    SumiError::Shared(inner) => inner,
                    other => Arc::new(other),
                })
            })
            .await;

        match outcome {
            Ok(value) => Ok(value.clone()),
            Err(error) => {
                self.evict(&key, &slot);
                Err(SumiError::Shared(Arc::clone(error)))
            }
        }
    }

    /// Returns the cached value for `key` without computing anything
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .and_then(|slot| slot.get())
            .and_then(|outcome| outcome.as_ref().ok())
            .cloned()
    }

    /// Returns the number of keys with a cached value
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .values()
            .filter(|slot| matches!(slot.get(), Some(Ok(_))))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Only the failed generation is removed; a newer slot stays untouched.
    fn evict(&self, key: &K, failed: &Slot<V>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, failed))
        {
            entries.remove(key);
        }
    }
}

impl<K, V> Default for BasicRegister<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
