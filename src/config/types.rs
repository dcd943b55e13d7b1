use serde::Deserialize;

/// Main configuration structure for Sumi-Crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
    /// Links the crawl starts from
    #[serde(default)]
    pub seeds: Vec<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent crawl workers
    pub concurrency: usize,

    /// Minimal delay between two requests of the same worker (milliseconds)
    #[serde(rename = "delay-ms", default)]
    pub delay_ms: u64,

    /// Number of extraction attempts per link
    #[serde(rename = "repeat-count", default = "default_repeat_count")]
    pub repeat_count: u32,

    /// Delay between two extraction attempts (milliseconds)
    #[serde(rename = "repeat-delay-ms", default)]
    pub repeat_delay_ms: u64,

    /// Only follow links on the host of the page they were found on
    #[serde(rename = "same-host-only", default = "default_true")]
    pub same_host_only: bool,

    /// Sanitize links before checking them for duplicates
    #[serde(rename = "sanitize-links", default = "default_true")]
    pub sanitize_links: bool,

    /// Respect robots.txt rules
    #[serde(rename = "follow-robots", default = "default_true")]
    pub follow_robots: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler, also used as the robots.txt product token
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Sitemap discovery strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapStrategy {
    /// `/sitemap.xml` at the root of the host
    Simple,
    /// `/sitemap.xml` at every level of the link's path
    Hierarchical,
    /// `Sitemap:` directives of robots.txt
    Robots,
}

/// Sitemap discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SitemapConfig {
    /// Whether sitemap links are extracted alongside page links
    #[serde(default)]
    pub enabled: bool,

    /// Strategies used to locate sitemaps
    #[serde(default = "default_strategies")]
    pub strategies: Vec<SitemapStrategy>,

    /// Maximal path depth for the hierarchical strategy
    #[serde(rename = "max-depth", default)]
    pub max_depth: Option<usize>,

    /// How many levels of sitemap index files are followed
    #[serde(rename = "max-index-depth", default = "default_max_index_depth")]
    pub max_index_depth: usize,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            strategies: default_strategies(),
            max_depth: None,
            max_index_depth: default_max_index_depth(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_repeat_count() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_strategies() -> Vec<SitemapStrategy> {
    vec![SitemapStrategy::Simple]
}

fn default_max_index_depth() -> usize {
    2
}
