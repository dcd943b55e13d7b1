//! Tag/attribute selection over HTML documents
//!
//! Extractors describe what to pull out of a page with a [`TagFilter`]: a set
//! of tag names, each with the attributes whose values are wanted. Values
//! come back in document order.

use scraper::{Html, Selector};
use std::collections::BTreeMap;

/// Tags and, for each tag, the attributes to collect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    tags: BTreeMap<String, Vec<String>>,
}

impl TagFilter {
    /// Creates a filter that selects nothing
    pub fn empty() -> Self {
        Self {
            tags: BTreeMap::new(),
        }
    }

    /// Adds a tag with the attributes to collect from it
    pub fn with_tag(mut self, tag: &str, attributes: &[&str]) -> Self {
        let entry = self.tags.entry(tag.to_ascii_lowercase()).or_default();
        for attribute in attributes {
            let attribute = attribute.to_ascii_lowercase();
            if !entry.contains(&attribute) {
                entry.push(attribute);
            }
        }
        self
    }

    /// The default filter for hyperlinks: `<a href>`
    pub fn hyperlinks() -> Self {
        Self::empty().with_tag("a", &["href"])
    }

    /// Filter for the document base link: `<base href>`
    pub fn base() -> Self {
        Self::empty().with_tag("base", &["href"])
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn selector(&self) -> Option<Selector> {
        let mut selectors = Vec::new();
        for (tag, attributes) in &self.tags {
            for attribute in attributes {
                selectors.push(format!("{}[{}]", tag, attribute));
            }
        }

        if selectors.is_empty() {
            return None;
        }

        Selector::parse(&selectors.join(", ")).ok()
    }
}

impl Default for TagFilter {
    fn default() -> Self {
        Self::hyperlinks()
    }
}

/// Collects the values of the attributes selected by `filter`, in document order
///
/// # Arguments
///
/// * `html` - The HTML content to search
/// * `filter` - The tags and attributes to collect
///
/// # Returns
///
/// The attribute values, untouched (relative links stay relative)
///
/// # Example
///
/// ```
/// use sumi_crawler::html::{select_attributes, TagFilter};
///
/// let html = r#"<html><body><a href="/one">1</a><img src="x.png"><a href="/two">2</a></body></html>"#;
/// let links = select_attributes(html, &TagFilter::hyperlinks());
/// assert_eq!(links, vec!["/one", "/two"]);
/// ```
pub fn select_attributes(html: &str, filter: &TagFilter) -> Vec<String> {
    let Some(selector) = filter.selector() else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut values = Vec::new();

    for element in document.select(&selector) {
        let Some(attributes) = filter.tags.get(element.value().name()) else {
            continue;
        };

        for attribute in attributes {
            if let Some(value) = element.value().attr(attribute) {
                values.push(value.to_string());
            }
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_hyperlinks() {
        let html = r#"
            <html><body>
                <a href="https://example.com/page1">Page 1</a>
                <a href="/page2">Page 2</a>
                <a name="anchor">No href</a>
            </body></html>
        "#;

        let links = select_attributes(html, &TagFilter::hyperlinks());
        assert_eq!(links, vec!["https://example.com/page1", "/page2"]);
    }

    #[test]
    fn test_select_several_tags_in_document_order() {
        let html = r#"
            <html><head><link rel="canonical" href="/canonical"></head>
            <body>
                <a href="/first">First</a>
                <img src="/image.png">
                <a href="/second">Second</a>
            </body></html>
        "#;

        let filter = TagFilter::hyperlinks()
            .with_tag("link", &["href"])
            .with_tag("img", &["src"]);
        let values = select_attributes(html, &filter);

        assert_eq!(
            values,
            vec!["/canonical", "/first", "/image.png", "/second"]
        );
    }

    #[test]
    fn test_several_attributes_of_one_tag() {
        let html = r#"<img src="/small.png" data-full="/large.png">"#;
        let filter = TagFilter::empty().with_tag("img", &["src", "data-full"]);

        assert_eq!(
            select_attributes(html, &filter),
            vec!["/small.png", "/large.png"]
        );
    }

    #[test]
    fn test_select_base() {
        let html = r#"<html><head><base href="https://cdn.example.com/"></head></html>"#;
        assert_eq!(
            select_attributes(html, &TagFilter::base()),
            vec!["https://cdn.example.com/"]
        );
    }

    #[test]
    fn test_empty_filter_selects_nothing() {
        let html = r#"<a href="/page">Page</a>"#;
        assert!(select_attributes(html, &TagFilter::empty()).is_empty());
        assert!(TagFilter::empty().is_empty());
        assert_eq!(TagFilter::default(), TagFilter::hyperlinks());
    }

    #[test]
    fn test_malformed_html() {
        let html = r#"<html><body><a href="/page1">Unclosed<div><a href="/page2">"#;
        let links = select_attributes(html, &TagFilter::hyperlinks());
        assert_eq!(links, vec!["/page1", "/page2"]);
    }

    #[test]
    fn test_filter_deduplicates_attributes() {
        let filter = TagFilter::empty()
            .with_tag("A", &["HREF"])
            .with_tag("a", &["href"]);
        assert_eq!(filter, TagFilter::hyperlinks());
    }
}
