//! Capability contracts shared by every crawler component
//!
//! The crawler is assembled from these kinds of capabilities:
//!
//! - [`LinkExtractor`]: produces the outbound links of a link
//! - [`LinkChecker`]: decides whether a discovered link should be followed
//! - [`LinkHandler`]: consumes a link (stores it, reports it, ...)
//! - [`LinkTransformer`]: post-processes extracted links with the fetched page at hand
//! - [`SitemapGenerator`]: proposes sitemap links for a site
//!
//! Failed extractions are routed to an [`ErrorHandler`].

mod sourced_link;
mod traits;

pub use sourced_link::SourcedLink;
pub use traits::{
    ErrorHandler, LinkChecker, LinkExtractor, LinkHandler, LinkTransformer,
    SitemapGenerator,
};
