use crate::crawler::FetchedPage;
use crate::html::{select_attributes, TagFilter};
use crate::models::LinkTransformer;
use crate::Result;
use url::Url;

/// Resolves relative links into absolute HTTP(S) links
///
/// Links are resolved against the page's `<base href>` when present, and
/// against the final URL of the response otherwise (so redirects are taken
/// into account). Fragments are removed, since they point into the same
/// resource.
///
/// **Dropped:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - Links that cannot be resolved or are not HTTP(S) after resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvingTransformer;

impl LinkTransformer for ResolvingTransformer {
    fn transform_links(&self, links: Vec<String>, page: &FetchedPage) -> Result<Vec<String>> {
        let page_url = Url::parse(&page.final_url)?;
        let base_url = select_attributes(&page.body, &TagFilter::base())
            .into_iter()
            .find_map(|href| page_url.join(href.trim()).ok())
            .unwrap_or(page_url);

        Ok(links
            .iter()
            .filter_map(|link| resolve_link(link, &base_url))
            .collect())
    }
}

/// Resolves a link href to an absolute URL and validates it
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowercase = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowercase.starts_with(scheme))
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    absolute_url.set_fragment(None);
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.to_string()),
        _ => None,
    }
}
