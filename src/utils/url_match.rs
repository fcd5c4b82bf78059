//! URL comparison helpers for click classification.

use url::Url;

/// Resolves a link destination against the page URL.
///
/// Browsers hand out absolute URLs on anchor elements, but raw `href`
/// attributes may be relative (`/a/b`, `page.html`, `#frag`); resolving
/// against the page reproduces what navigation would actually load.
/// Returns `None` for destinations that cannot be parsed.
pub fn resolve_href(page: &Url, href: &str) -> Option<Url> {
    page.join(href).ok()
}

/// Whether two URLs point at the same host.
///
/// Ports participate in the comparison so `http://site.com` and
/// `http://site.com:8080` count as different hosts; default ports compare
/// equal to their explicit form.
pub fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}

/// The path plus query string of a URL, fragment excluded.
pub fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("http://site.com/a/b?x=1").unwrap()
    }

    #[test]
    fn test_resolve_absolute() {
        let url = resolve_href(&page(), "https://other.com/c").unwrap();
        assert_eq!(url.as_str(), "https://other.com/c");
    }

    #[test]
    fn test_resolve_relative() {
        let url = resolve_href(&page(), "c").unwrap();
        assert_eq!(url.as_str(), "http://site.com/a/c");

        let url = resolve_href(&page(), "/root").unwrap();
        assert_eq!(url.as_str(), "http://site.com/root");
    }

    #[test]
    fn test_resolve_fragment_only() {
        let url = resolve_href(&page(), "#frag").unwrap();
        assert_eq!(url.as_str(), "http://site.com/a/b?x=1#frag");
    }

    #[test]
    fn test_resolve_invalid() {
        assert!(resolve_href(&page(), "http://[bad").is_none());
    }

    #[test]
    fn test_same_host_default_ports() {
        let a = Url::parse("http://site.com/x").unwrap();
        let b = Url::parse("http://site.com:80/y").unwrap();
        assert!(same_host(&a, &b));

        let c = Url::parse("http://site.com:8080/y").unwrap();
        assert!(!same_host(&a, &c));

        let d = Url::parse("http://other.com/x").unwrap();
        assert!(!same_host(&a, &d));
    }

    #[test]
    fn test_path_and_query() {
        assert_eq!(path_and_query(&page()), "/a/b?x=1");

        let bare = Url::parse("http://site.com").unwrap();
        assert_eq!(path_and_query(&bare), "/");
    }
}
