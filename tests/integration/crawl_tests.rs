//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! configured pipeline end-to-end.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use sumi_crawler::config::{
    Config, CrawlerConfig, HttpConfig, SitemapConfig, SitemapStrategy, UserAgentConfig,
};
use sumi_crawler::crawler::Pipeline;
use sumi_crawler::{LinkHandler, SourcedLink};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from the given seeds
fn create_test_config(seeds: Vec<String>) -> Config {
    Config {
        crawler: CrawlerConfig {
            concurrency: 4,
            delay_ms: 0,
            repeat_count: 1,
            repeat_delay_ms: 0,
            same_host_only: true,
            sanitize_links: true,
            follow_robots: true,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        http: HttpConfig::default(),
        sitemap: SitemapConfig::default(),
        seeds,
    }
}

/// Collects the links the crawl hands over
#[derive(Default)]
struct Recorder {
    links: Mutex<Vec<String>>,
}

impl Recorder {
    fn sorted_links(&self) -> Vec<String> {
        let mut links = self.links.lock().unwrap().clone();
        links.sort();
        links
    }
}

#[async_trait]
impl LinkHandler for Recorder {
    async fn handle_link(&self, _token: &CancellationToken, link: &SourcedLink) {
        self.links.lock().unwrap().push(link.link.clone());
    }
}

async fn mount_robots(mock_server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(mock_server)
        .await;
}

async fn mount_page(mock_server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body, "text/html; charset=utf-8"),
        )
        .mount(mock_server)
        .await;
}

async fn run(config: &Config) -> Arc<Recorder> {
    let recorder = Arc::new(Recorder::default());
    let pipeline = Pipeline::from_config_with_handler(config, recorder.clone())
        .expect("Failed to build pipeline");

    tokio::time::timeout(Duration::from_secs(30), pipeline.run(&CancellationToken::new()))
        .await
        .expect("Crawl did not finish");

    recorder
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, 200, "User-agent: *\nAllow: /").await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="https://external.invalid/">External</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        r#"<a href="/">Home</a> <a href="page2">Page 2</a> <a href="./page1#top">Self</a>"#,
    )
    .await;
    mount_page(&mock_server, "/page2", r#"<a href="/page1/">Page 1 again</a>"#).await;

    let config = create_test_config(vec![format!("{}/", base_url)]);
    let recorder = run(&config).await;

    assert_eq!(
        recorder.sorted_links(),
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]
    );
}

#[tokio::test]
async fn test_crawl_respects_robots_txt() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, 200, "User-agent: TestBot\nDisallow: /private").await;
    mount_page(
        &mock_server,
        "/",
        r#"<a href="/public">Public</a> <a href="/private/secret">Secret</a>"#,
    )
    .await;
    mount_page(&mock_server, "/public", "<p>nothing here</p>").await;
    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![format!("{}/", base_url)]);
    let recorder = run(&config).await;

    assert_eq!(
        recorder.sorted_links(),
        vec![format!("{}/", base_url), format!("{}/public", base_url)]
    );
}

#[tokio::test]
async fn test_unavailable_robots_txt_blocks_the_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, 503, "").await;
    mount_page(&mock_server, "/", r#"<a href="/page1">Page 1</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![format!("{}/", base_url)]);
    let recorder = run(&config).await;

    assert!(recorder.sorted_links().is_empty());
}

#[tokio::test]
async fn test_sitemap_discovery() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(
        &mock_server,
        200,
        &format!("User-agent: *\nAllow: /\nSitemap: {}/listed.xml", base_url),
    )
    .await;
    mount_page(&mock_server, "/", "<p>no links</p>").await;
    mount_page(&mock_server, "/hidden", "<p>only in a sitemap</p>").await;
    mount_page(&mock_server, "/also-hidden", "<p>only in a sitemap</p>").await;
    Mock::given(method("GET"))
        .and(path("/listed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<sitemapindex><sitemap><loc>{}/pages.xml</loc></sitemap></sitemapindex>",
            base_url
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<urlset><url><loc>{0}/hidden</loc></url><url><loc>{0}/also-hidden</loc></url></urlset>",
            base_url
        )))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(vec![format!("{}/", base_url)]);
    config.sitemap = SitemapConfig {
        enabled: true,
        strategies: vec![SitemapStrategy::Simple, SitemapStrategy::Robots],
        max_depth: None,
        max_index_depth: 2,
    };
    let recorder = run(&config).await;

    assert_eq!(
        recorder.sorted_links(),
        vec![
            format!("{}/", base_url),
            format!("{}/also-hidden", base_url),
            format!("{}/hidden", base_url),
        ]
    );
}

#[tokio::test]
async fn test_failed_pages_are_retried_then_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, 404, "").await;
    mount_page(&mock_server, "/", r#"<a href="/broken">Broken</a> <a href="/ok">Ok</a>"#).await;
    mount_page(&mock_server, "/ok", "<p>fine</p>").await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(vec![format!("{}/", base_url)]);
    config.crawler.repeat_count = 3;
    config.crawler.repeat_delay_ms = 10;
    let recorder = run(&config).await;

    assert_eq!(
        recorder.sorted_links(),
        vec![
            format!("{}/", base_url),
            format!("{}/broken", base_url),
            format!("{}/ok", base_url),
        ]
    );
}

#[tokio::test]
async fn test_cancelled_crawl_stops() {
    let mock_server = MockServer::start().await;
    mount_robots(&mock_server, 404, "").await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p>slow</p>", "text/html")
                .set_delay(Duration::from_secs(60)),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![format!("{}/", mock_server.uri())]);
    let pipeline = Pipeline::from_config(&config).expect("Failed to build pipeline");
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            token.cancel();
        })
    };

    tokio::time::timeout(Duration::from_secs(10), pipeline.run(&token))
        .await
        .expect("Cancelled crawl did not stop");
    canceller.await.unwrap();
}
