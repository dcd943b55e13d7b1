//! Deduplication register
//!
//! Remembers every link seen during a crawl. Links are only ever added, so
//! the register grows for the lifetime of the crawl.

use crate::url::sanitize_link;
use crate::UrlError;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Whether links are sanitized before the uniqueness check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SanitizeLink {
    /// Compare links exactly as given
    #[default]
    No,
    /// Compare links after [`sanitize_link`]
    Yes,
}

/// Thread-safe set of already seen links
#[derive(Debug, Default)]
pub struct LinkRegister {
    sanitize: SanitizeLink,
    links: Mutex<HashSet<String>>,
}

impl LinkRegister {
    pub fn new(sanitize: SanitizeLink) -> Self {
        Self {
            sanitize,
            links: Mutex::new(HashSet::new()),
        }
    }

    /// Registers a link if it was not seen before
    ///
    /// # Arguments
    ///
    /// * `link` - The link to register
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The link was registered by this call
    /// * `Ok(false)` - The link (or an equivalent spelling) was already registered
    /// * `Err(UrlError)` - Sanitization is enabled and the link is malformed
    pub fn register_link(&self, link: &str) -> Result<bool, UrlError> {
        let key = match self.sanitize {
            SanitizeLink::Yes => sanitize_link(link)?,
            SanitizeLink::No => link.to_string(),
        };

        let mut links = self.links.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(links.insert(key))
    }

    /// Returns the number of registered links
    pub fn len(&self) -> usize {
        self.links
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
