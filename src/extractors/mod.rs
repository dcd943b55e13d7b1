//! Link extractors
//!
//! [`HtmlExtractor`] is the extractor that actually fetches pages. The rest
//! combine or decorate other extractors:
//!
//! - [`ExtractorGroup`]: concatenates the links of several extractors
//! - [`DelayingExtractor`]: enforces a minimal delay between calls per worker
//! - [`RepeatingExtractor`]: retries failed extractions
//! - [`TrimmingExtractor`]: trims whitespace from extracted links
//!
//! Sitemap-based extraction lives in [`crate::sitemap::SitemapExtractor`].

mod delaying;
mod group;
mod html;
mod repeating;
mod trimming;

pub use delaying::DelayingExtractor;
pub use group::ExtractorGroup;
pub use html::HtmlExtractor;
pub use repeating::RepeatingExtractor;
pub use trimming::TrimmingExtractor;
