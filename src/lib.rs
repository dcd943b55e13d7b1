//! Sumi-Crawler: a polite, composable web crawler engine
//!
//! This crate crawls websites from a set of seed links, extracting outbound
//! links, filtering and deduplicating them, and feeding them back into a
//! shared work queue until nothing is left to visit. Crawling respects
//! robots.txt and can discover extra links through sitemaps.
//!
//! Behaviors are assembled from small capabilities (see [`models`]) that are
//! combined with groups and decorators rather than inheritance.

pub mod checkers;
pub mod config;
pub mod crawler;
pub mod extractors;
pub mod handlers;
pub mod html;
pub mod models;
pub mod register;
pub mod robots;
pub mod sitemap;
pub mod transformers;
pub mod url;

use std::sync::Arc;
use thiserror::Error;

/// Main error type for Sumi-Crawler operations
#[derive(Debug, Error)]
pub enum SumiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Robots.txt error: {0}")]
    Robots(String),

    #[error("Sitemap error: {0}")]
    Sitemap(String),

    #[error("Member #{index} of the group failed: {source}")]
    Group {
        index: usize,
        #[source]
        source: Box<SumiError>,
    },

    /// An error shared between every caller of the same register lookup
    #[error("{0}")]
    Shared(Arc<SumiError>),

    #[error("Crawl was cancelled")]
    Cancelled,
}

impl SumiError {
    /// Wraps an error with the index of the group member that produced it
    pub fn in_group(index: usize, source: SumiError) -> Self {
        SumiError::Group {
            index,
            source: Box::new(source),
        }
    }

    /// Returns true if the error (or the error it wraps) is a cancellation
    pub fn is_cancelled(&self) -> bool {
        match self {
            SumiError::Cancelled => true,
            SumiError::Group { source, .. } => source.is_cancelled(),
            SumiError::Shared(inner) => inner.is_cancelled(),
            _ => false,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for Sumi-Crawler operations
pub type Result<T> = std::result::Result<T, SumiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlDependencies};
pub use models::{ErrorHandler, LinkChecker, LinkExtractor, LinkHandler, SourcedLink};
pub use url::sanitize_link;
