use crate::models::SitemapGenerator;
use crate::register::SanitizeLink;
use crate::robots::RobotsRegister;
use crate::url::{parse_http_link, sanitize_link};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

const SITEMAP_FILE: &str = "sitemap.xml";

fn sitemap_at(base: &Url, directories: &[&str]) -> String {
    let mut url = base.clone();
    let path = if directories.is_empty() {
        format!("/{}", SITEMAP_FILE)
    } else {
        format!("/{}/{}", directories.join("/"), SITEMAP_FILE)
    };
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    url.to_string()
}

/// Proposes `/sitemap.xml` at the root of the base link's site
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleGenerator;

#[async_trait]
impl SitemapGenerator for SimpleGenerator {
    async fn generate_links(&self, _token: &CancellationToken, base_link: &str) -> Result<Vec<String>> {
        let base = parse_http_link(base_link)?;
        Ok(vec![sitemap_at(&base, &[])])
    }
}

/// Proposes `sitemap.xml` in every directory from the root down to the
/// directory containing the base link
///
/// For `http://example.com/one/two/test` the candidates are
/// `/sitemap.xml`, `/one/sitemap.xml` and `/one/two/sitemap.xml`. A link
/// ending with a slash is a directory itself. `max_depth` limits how many
/// directory levels below the root are proposed; `Some(0)` proposes the root
/// only.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalGenerator {
    sanitize: SanitizeLink,
    max_depth: Option<usize>,
}

impl HierarchicalGenerator {
    pub fn new(sanitize: SanitizeLink, max_depth: Option<usize>) -> Self {
        Self {
            sanitize,
            max_depth,
        }
    }

    fn candidates(&self, base_link: &str) -> Result<Vec<String>> {
        let is_directory = parse_http_link(base_link)?.path().ends_with('/');
        let base = match self.sanitize {
            SanitizeLink::Yes => parse_http_link(&sanitize_link(base_link)?)?,
            SanitizeLink::No => parse_http_link(base_link)?,
        };

        let mut directories: Vec<&str> = base
            .path_segments()
            .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
            .unwrap_or_default();
        if !is_directory {
            directories.pop();
        }

        let levels = match self.max_depth {
            Some(max_depth) => max_depth.min(directories.len()),
            None => directories.len(),
        };

        Ok((0..=levels)
            .map(|level| sitemap_at(&base, &directories[..level]))
            .collect())
    }
}

#[async_trait]
impl SitemapGenerator for HierarchicalGenerator {
    async fn generate_links(&self, _token: &CancellationToken, base_link: &str) -> Result<Vec<String>> {
        self.candidates(base_link)
    }
}

/// Proposes the sitemaps listed in the site's robots.txt
#[derive(Clone)]
pub struct RobotsTxtGenerator {
    register: Arc<RobotsRegister>,
}

impl RobotsTxtGenerator {
    pub fn new(register: Arc<RobotsRegister>) -> Self {
        Self { register }
    }
}

#[async_trait]
impl SitemapGenerator for RobotsTxtGenerator {
    async fn generate_links(&self, token: &CancellationToken, base_link: &str) -> Result<Vec<String>> {
        let robots = self.register.get(token, base_link).await?;
        Ok(robots.sitemaps())
    }
}
