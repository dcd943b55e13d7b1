use crate::crawler::FetchedPage;
use crate::models::LinkTransformer;
use crate::Result;

/// Trims surrounding whitespace from links and drops the empty ones
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimmingTransformer;

impl LinkTransformer for TrimmingTransformer {
    fn transform_links(&self, links: Vec<String>, _page: &FetchedPage) -> Result<Vec<String>> {
        Ok(trim_links(links))
    }
}

/// Trims every link and drops the ones left empty
pub(crate) fn trim_links(links: Vec<String>) -> Vec<String> {
    links
        .into_iter()
        .filter_map(|link| {
            let trimmed = link.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.len() == link.len() {
                Some(link)
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
