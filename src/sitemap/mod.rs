//! Sitemap discovery
//!
//! Candidate sitemap links for a site come from [`SitemapGenerator`]s:
//! the conventional `/sitemap.xml` at the root ([`SimpleGenerator`]) or at
//! every directory level of a link ([`HierarchicalGenerator`]), and the
//! `Sitemap:` directives of robots.txt ([`RobotsTxtGenerator`]).
//!
//! The [`SitemapRegister`] caches both the candidates per base link and the
//! parsed documents per sitemap link, and the [`SitemapExtractor`] turns the
//! whole thing into a [`crate::models::LinkExtractor`].
//!
//! [`SitemapGenerator`]: crate::models::SitemapGenerator

mod extractor;
mod generators;
mod group;
mod parser;
mod register;

pub use extractor::SitemapExtractor;
pub use generators::{HierarchicalGenerator, RobotsTxtGenerator, SimpleGenerator};
pub use group::GeneratorGroup;
pub use parser::{parse_sitemap, SitemapDocument};
pub use register::SitemapRegister;
