//! The standard crawl pipeline, assembled from configuration
//!
//! Extraction: HTML links (plus sitemap links when enabled), trimmed,
//! retried and delayed per worker. Checking: same host, not seen before and
//! allowed by robots.txt. Handling: each link once, gated by robots.txt, on
//! a handler pool decoupled from the crawl workers.

use crate::checkers::{CheckerGroup, DuplicateChecker, HostChecker};
use crate::config::{Config, SitemapConfig, SitemapStrategy};
use crate::crawler::{build_http_client, crawl, CrawlDependencies};
use crate::extractors::{
    DelayingExtractor, ExtractorGroup, HtmlExtractor, RepeatingExtractor, TrimmingExtractor,
};
use crate::handlers::{
    CheckedHandler, ConcurrentHandler, LoggingErrorHandler, LoggingHandler, UniqueHandler,
};
use crate::models::{LinkExtractor, LinkHandler, SitemapGenerator};
use crate::register::{LinkRegister, SanitizeLink};
use crate::robots::{RobotsChecker, RobotsRegister};
use crate::sitemap::{
    GeneratorGroup, HierarchicalGenerator, RobotsTxtGenerator, SimpleGenerator, SitemapExtractor,
    SitemapRegister,
};
use crate::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A crawl ready to run: seed links plus the assembled capabilities
pub struct Pipeline {
    concurrency: usize,
    seeds: Vec<String>,
    dependencies: CrawlDependencies,
    handler: Arc<ConcurrentHandler>,
}

impl Pipeline {
    /// Builds the pipeline described by `config`, logging every crawled link
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_config_with_handler(config, Arc::new(LoggingHandler))
    }

    /// Builds the pipeline described by `config` around a custom handler
    ///
    /// `handler` receives every distinct link the crawl reaches (seeds
    /// included) that robots.txt allows.
    pub fn from_config_with_handler(config: &Config, handler: Arc<dyn LinkHandler>) -> Result<Self> {
        let client = build_http_client(&config.user_agent, &config.http)?;
        let sanitize = if config.crawler.sanitize_links {
            SanitizeLink::Yes
        } else {
            SanitizeLink::No
        };
        let robots = Arc::new(RobotsRegister::new(client.clone()));
        let robots_checker = RobotsChecker::new(robots.clone(), config.user_agent.crawler_name.clone());

        let extractor = build_extractor(config, &client, sanitize, &robots);

        // Seeds are queued without being checked, so mark them as seen
        let queued = Arc::new(LinkRegister::new(sanitize));
        for seed in &config.seeds {
            if let Err(e) = queued.register_link(seed) {
                tracing::warn!("Seed link {} cannot be sanitized: {}", seed, e);
            }
        }

        let mut checker = CheckerGroup::default();
        if config.crawler.same_host_only {
            checker = checker.with(HostChecker);
        }
        checker = checker.with(DuplicateChecker::new(queued));
        if config.crawler.follow_robots {
            checker = checker.with(robots_checker.clone());
        }

        let gated: Arc<dyn LinkHandler> = if config.crawler.follow_robots {
            Arc::new(CheckedHandler::new(robots_checker, handler))
        } else {
            handler
        };
        let unique = UniqueHandler::new(Arc::new(LinkRegister::new(sanitize)), gated);
        let handler = Arc::new(ConcurrentHandler::new(Arc::new(unique)));

        tracing::debug!(
            "Pipeline ready: {} checkers, sitemaps {}",
            checker.len(),
            if config.sitemap.enabled { "enabled" } else { "disabled" }
        );

        Ok(Self {
            concurrency: config.crawler.concurrency,
            seeds: config.seeds.clone(),
            dependencies: CrawlDependencies {
                extractor,
                checker: Arc::new(checker),
                handler: handler.clone(),
                error_handler: Arc::new(LoggingErrorHandler),
            },
            handler,
        })
    }

    /// Returns the assembled capabilities
    ///
    /// The handler only queues links; they are handled while [`Pipeline::run`]
    /// is running.
    pub fn dependencies(&self) -> CrawlDependencies {
        self.dependencies.clone()
    }

    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }

    /// Crawls from the configured seeds until done or cancelled
    pub async fn run(&self, token: &CancellationToken) {
        let crawling = async {
            crawl(token, self.concurrency, self.seeds.clone(), self.dependencies()).await;
            self.handler.stop();
        };

        tokio::join!(crawling, self.handler.run(token, self.concurrency));
    }
}

fn build_extractor(
    config: &Config,
    client: &Client,
    sanitize: SanitizeLink,
    robots: &Arc<RobotsRegister>,
) -> Arc<dyn LinkExtractor> {
    let html = HtmlExtractor::new(client.clone());

    let base: Arc<dyn LinkExtractor> = if config.sitemap.enabled {
        let generator = build_sitemap_generator(&config.sitemap, sanitize, robots);
        let register = Arc::new(SitemapRegister::new(client.clone(), generator));
        let sitemaps = SitemapExtractor::new(register, config.sitemap.max_index_depth);
        Arc::new(ExtractorGroup::default().with(html).with(sitemaps))
    } else {
        Arc::new(html)
    };

    let repeating = RepeatingExtractor::new(
        TrimmingExtractor::new(base),
        config.crawler.repeat_count,
        Duration::from_millis(config.crawler.repeat_delay_ms),
    );
    Arc::new(DelayingExtractor::new(
        repeating,
        Duration::from_millis(config.crawler.delay_ms),
    ))
}

fn build_sitemap_generator(
    config: &SitemapConfig,
    sanitize: SanitizeLink,
    robots: &Arc<RobotsRegister>,
) -> Arc<dyn SitemapGenerator> {
    let generators = config
        .strategies
        .iter()
        .map(|strategy| -> Arc<dyn SitemapGenerator> {
            match strategy {
                SitemapStrategy::Simple => Arc::new(SimpleGenerator),
                SitemapStrategy::Hierarchical => {
                    Arc::new(HierarchicalGenerator::new(sanitize, config.max_depth))
                }
                SitemapStrategy::Robots => Arc::new(RobotsTxtGenerator::new(robots.clone())),
            }
        })
        .collect();

    Arc::new(GeneratorGroup::new(generators))
}
