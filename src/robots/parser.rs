//! Robots.txt parser implementation
//!
//! Matching is delegated to the robotstxt crate, which follows Google's
//! rules: the most specific user-agent group wins over `*`, and the longest
//! matching rule wins inside a group.

use robotstxt::{parse_robotstxt, DefaultMatcher, RobotsParseHandler};

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
    allow_all: bool,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// This is the policy of sites that do not publish a robots.txt file.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Checks if a link is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `link` - The full link to check
    /// * `user_agent` - The crawler's product token (e.g. "SumiCrawler")
    pub fn is_allowed(&self, link: &str, user_agent: &str) -> bool {
        if self.allow_all || self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, link)
    }

    /// Returns the sitemap links listed with `Sitemap:` directives
    ///
    /// Directives apply regardless of user-agent groups and keep file order.
    pub fn sitemaps(&self) -> Vec<String> {
        let mut collector = SitemapCollector::default();
        parse_robotstxt(&self.content, &mut collector);
        collector.sitemaps
    }
}

#[derive(Default)]
struct SitemapCollector {
    sitemaps: Vec<String>,
}

impl RobotsParseHandler for SitemapCollector {
    fn handle_robots_start(&mut self) {}
    fn handle_robots_end(&mut self) {}
    fn handle_user_agent(&mut self, _line_num: u32, _user_agent: &str) {}
    fn handle_allow(&mut self, _line_num: u32, _value: &str) {}
    fn handle_disallow(&mut self, _line_num: u32, _value: &str) {}

    fn handle_sitemap(&mut self, _line_num: u32, value: &str) {
        if !value.is_empty() {
            self.sitemaps.push(value.to_string());
        }
    }

    fn handle_unknown_action(&mut self, _line_num: u32, _action: &str, _value: &str) {}
}
