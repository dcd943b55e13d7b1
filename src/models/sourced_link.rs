use std::fmt;

/// A link paired with the link it was discovered on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcedLink {
    /// The page the link was found on
    pub source_link: String,

    /// The link under consideration
    pub link: String,
}

impl SourcedLink {
    pub fn new(source_link: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            source_link: source_link.into(),
            link: link.into(),
        }
    }

    /// Creates a link for a crawl seed, which is its own source
    pub fn seed(link: impl Into<String>) -> Self {
        let link = link.into();
        Self {
            source_link: link.clone(),
            link,
        }
    }

    /// Returns true if this link was not discovered on another page
    pub fn is_seed(&self) -> bool {
        self.source_link == self.link
    }
}

impl fmt::Display for SourcedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (from {})", self.link, self.source_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_its_own_source() {
        let link = SourcedLink::seed("https://example.com/");
        assert_eq!(link.source_link, "https://example.com/");
        assert!(link.is_seed());
    }

    #[test]
    fn test_discovered_link_is_not_seed() {
        let link = SourcedLink::new("https://example.com/", "https://example.com/page");
        assert!(!link.is_seed());
    }

    #[test]
    fn test_value_equality() {
        let first = SourcedLink::new("https://a.com/", "https://b.com/");
        let second = SourcedLink::new("https://a.com/", "https://b.com/");
        assert_eq!(first, second);
    }
}
