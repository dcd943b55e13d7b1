//! Registers shared by crawl workers
//!
//! - [`BasicRegister`]: compute-once, cache-forever lookups that coalesce
//!   concurrent callers (used for robots.txt and sitemap lookups)
//! - [`LinkRegister`]: the set of links already seen during a crawl

mod basic;
mod link;

pub use basic::BasicRegister;
pub use link::{LinkRegister, SanitizeLink};
