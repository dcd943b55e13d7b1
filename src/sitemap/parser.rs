//! Sitemap XML parsing
//!
//! Only the `<loc>` of each entry is kept. Extensions nested inside entries
//! (images, videos, alternates) are ignored.

use crate::{Result, SumiError};
use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed sitemap file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// A `<urlset>`: links of crawlable pages
    UrlSet(Vec<String>),
    /// A `<sitemapindex>`: links of further sitemap files
    Index(Vec<String>),
}

impl SitemapDocument {
    pub fn links(&self) -> &[String] {
        match self {
            SitemapDocument::UrlSet(links) | SitemapDocument::Index(links) => links,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    UrlSet,
    Index,
}

impl Root {
    fn entry(self) -> &'static [u8] {
        match self {
            Root::UrlSet => b"url",
            Root::Index => b"sitemap",
        }
    }
}

// Depths of the elements we care about, counting the root as 1
const ENTRY_DEPTH: usize = 2;
const LOC_DEPTH: usize = 3;

/// Parses a sitemap or sitemap index file
///
/// # Returns
///
/// * `Ok(SitemapDocument)` - The links listed by the file, in file order
/// * `Err(SumiError::Sitemap)` - Malformed XML or an unknown root element
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut root: Option<Root> = None;
    let mut depth = 0;
    let mut in_entry = false;
    let mut in_loc = false;
    let mut current_loc = String::new();
    let mut links = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                let name = e.local_name();

                match (root, depth) {
                    (None, 1) => {
                        root = Some(match name.as_ref() {
                            b"urlset" => Root::UrlSet,
                            b"sitemapindex" => Root::Index,
                            other => {
                                return Err(SumiError::Sitemap(format!(
                                    "unexpected root element <{}>",
                                    String::from_utf8_lossy(other)
                                )))
                            }
                        });
                    }
                    (Some(root), ENTRY_DEPTH) if name.as_ref() == root.entry() => {
                        in_entry = true;
                    }
                    (Some(_), LOC_DEPTH) if in_entry && name.as_ref() == b"loc" => {
                        in_loc = true;
                        current_loc.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                if in_loc && depth == LOC_DEPTH {
                    in_loc = false;
                    let loc = current_loc.trim();
                    if !loc.is_empty() {
                        links.push(loc.to_string());
                    }
                } else if depth == ENTRY_DEPTH {
                    in_entry = false;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) if in_loc => {
                let text = e
                    .unescape()
                    .map_err(|e| SumiError::Sitemap(format!("invalid text: {}", e)))?;
                current_loc.push_str(&text);
            }
            Ok(Event::CData(e)) if in_loc => {
                current_loc.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SumiError::Sitemap(format!(
                    "XML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    match root {
        Some(Root::UrlSet) => Ok(SitemapDocument::UrlSet(links)),
        Some(Root::Index) => Ok(SitemapDocument::Index(links)),
        None => Err(SumiError::Sitemap("document has no root element".to_string())),
    }
}
