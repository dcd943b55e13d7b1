use crate::UrlError;
use url::Url;

/// Sanitizes a link so that equivalent spellings of the same path collide
///
/// # Sanitization Steps
///
/// 1. Parse the link; reject if malformed
/// 2. Normalize the path:
///    - Remove dot segments (. and ..)
///    - Collapse repeated slashes
///    - Remove trailing slash (except for root /)
///    - Empty path becomes /
///
/// Scheme, host, query and fragment are kept as they are.
///
/// # Arguments
///
/// * `link` - The link to sanitize
///
/// # Returns
///
/// * `Ok(String)` - The sanitized link
/// * `Err(UrlError)` - The link cannot be parsed
///
/// # Examples
///
/// ```
/// use sumi_crawler::url::sanitize_link;
///
/// assert_eq!(
///     sanitize_link("http://example.com/one/two/../test").unwrap(),
///     sanitize_link("http://example.com/one/test").unwrap(),
/// );
/// ```
pub fn sanitize_link(link: &str) -> Result<String, UrlError> {
    let mut url = Url::parse(link).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(UrlError::Malformed(format!(
            "Link has no hierarchical path: {}",
            link
        )));
    }

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    Ok(url.to_string())
}

/// Normalizes a URL path by removing dot segments and trailing slashes
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." | "%2e" | "%2E" => continue,
            ".." | "%2e%2e" | "%2E%2E" | ".%2e" | "%2e." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_segment_collides_with_direct_path() {
        assert_eq!(
            sanitize_link("http://example.com/one/two/../test").unwrap(),
            sanitize_link("http://example.com/one/test").unwrap()
        );
    }

    #[test]
    fn test_current_segment_removed() {
        let result = sanitize_link("https://example.com/a/./b").unwrap();
        assert_eq!(result, "https://example.com/a/b");
    }

    #[test]
    fn test_trailing_slash_removed() {
        let result = sanitize_link("https://example.com/page/").unwrap();
        assert_eq!(result, "https://example.com/page");
    }

    #[test]
    fn test_root_kept() {
        assert_eq!(
            sanitize_link("https://example.com").unwrap(),
            "https://example.com/"
        );
        assert_eq!(
            sanitize_link("https://example.com/").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_repeated_slashes_collapsed() {
        let result = sanitize_link("https://example.com///path//to///page").unwrap();
        assert_eq!(result, "https://example.com/path/to/page");
    }

    #[test]
    fn test_parent_directory_at_root() {
        let result = sanitize_link("https://example.com/../page").unwrap();
        assert_eq!(result, "https://example.com/page");
    }

    #[test]
    fn test_encoded_dot_segments() {
        let result = sanitize_link("https://example.com/a/%2e%2e/b").unwrap();
        assert_eq!(result, "https://example.com/b");
    }

    #[test]
    fn test_query_and_fragment_kept() {
        let result = sanitize_link("https://example.com/a/../b?x=1#top").unwrap();
        assert_eq!(result, "https://example.com/b?x=1#top");
    }

    #[test]
    fn test_malformed_link() {
        let result = sanitize_link("not a url");
        assert!(matches!(result.unwrap_err(), UrlError::Parse(_)));
    }

    #[test]
    fn test_non_hierarchical_link() {
        let result = sanitize_link("mailto:admin@example.com");
        assert!(matches!(result.unwrap_err(), UrlError::Malformed(_)));
    }
}
