//! Crawler module: the crawl loop and the pieces it is assembled from
//!
//! This module contains:
//! - The self-feeding crawl loop ([`crawl`])
//! - Its work queue and completion counter
//! - HTTP fetching shared by the extractors
//! - The configuration-driven [`Pipeline`]

mod coordinator;
mod fetcher;
mod pipeline;
mod scheduler;

pub use coordinator::{crawl, CrawlDependencies};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use pipeline::Pipeline;
pub use scheduler::{CompletionCounter, WorkQueue};
