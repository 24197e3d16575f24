// src/page/links.rs
// =============================================================================
// This module pulls the crawlable links out of a downloaded HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Tolerates broken markup the same way browsers do
// - Supports CSS selectors for finding elements
//
// A link is kept only when:
// 1. it comes from the href of an <a> element
// 2. it is not a fragment-only reference ("#top")
// 3. it parses, on its own or relative to the page URL
// 4. its scheme is http or https
// 5. its hostname is exactly the hostname of the page it was found on
//
// Extraction never fails. Anything that doesn't fit the rules is dropped.
// =============================================================================

use std::sync::OnceLock;

use scraper::{Html, Selector};
use url::Url;

fn anchor_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    // "a[href]" is a constant, valid selector
    SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap())
}

// Extracts every in-scope link from `body`
//
// Parameters:
//   page_url: where `body` was downloaded from; relative hrefs resolve
//             against it and its hostname defines the scope
//   body: raw page bytes (decoded as UTF-8, invalid sequences replaced)
//
// Returns: absolute URLs with the fragment removed, in document order.
// Duplicates are left in; the ledger handles them.
//
// Example:
//   page_url = "https://example.com/docs/"
//   body = "<a href='intro.html'>" -> ["https://example.com/docs/intro.html"]
pub fn extract_links(page_url: &Url, body: &[u8]) -> Vec<Url> {
    let Some(page_host) = page_url.host_str() else {
        return Vec::new();
    };

    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    document
        .select(anchor_selector())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(page_url, href))
        .filter(|link| link.host_str() == Some(page_host))
        .collect()
}

// Resolves an href against the page it was found on
//
// Relative references inherit the page's scheme, host and port, so
// "/a" on http://127.0.0.1:8080/ becomes http://127.0.0.1:8080/a.
fn resolve_link(page_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let mut link = page_url.join(href).ok()?;
    if !matches!(link.scheme(), "http" | "https") {
        return None;
    }

    link.set_fragment(None);
    Some(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(page: &str, html: &str) -> Vec<String> {
        let page = Url::parse(page).unwrap();
        extract_links(&page, html.as_bytes())
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_scope_filtering() {
        let html = r##"
            <a href="/a">A</a>
            <a href="https://example.com/b">B</a>
            <a href="https://other.com/c">C</a>
            <a href="#frag">Top</a>
        "##;
        assert_eq!(
            links("https://example.com/", html),
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_relative_link_inherits_page_scheme_and_port() {
        let html = r#"<a href="/next">Next</a>"#;
        assert_eq!(
            links("http://127.0.0.1:8080/start", html),
            vec!["http://127.0.0.1:8080/next"]
        );
    }

    #[test]
    fn test_path_relative_link() {
        let html = r#"<a href="intro.html">Intro</a><a href="../up">Up</a>"#;
        assert_eq!(
            links("https://example.com/docs/guide/", html),
            vec![
                "https://example.com/docs/guide/intro.html",
                "https://example.com/docs/up"
            ]
        );
    }

    #[test]
    fn test_subdomain_is_out_of_scope() {
        let html = r#"<a href="https://www.example.com/">www</a>"#;
        assert!(links("https://example.com/", html).is_empty());
    }

    #[test]
    fn test_same_host_other_scheme_is_kept() {
        let html = r#"<a href="http://example.com/plain">plain</a>"#;
        assert_eq!(
            links("https://example.com/", html),
            vec!["http://example.com/plain"]
        );
    }

    #[test]
    fn test_non_http_schemes_are_skipped() {
        let html = r#"
            <a href="mailto:test@example.com">Email</a>
            <a href="javascript:void(0)">JS</a>
            <a href="ftp://example.com/file">FTP</a>
        "#;
        assert!(links("https://example.com/", html).is_empty());
    }

    #[test]
    fn test_fragment_is_stripped_but_query_kept() {
        let html = r#"<a href="/list?page=2#results">Page 2</a>"#;
        assert_eq!(
            links("https://example.com/", html),
            vec!["https://example.com/list?page=2"]
        );
    }

    #[test]
    fn test_unparseable_href_is_skipped() {
        let html = r#"<a href="http://[::1">bad</a><a href="/ok">ok</a>"#;
        assert_eq!(
            links("https://example.com/", html),
            vec!["https://example.com/ok"]
        );
    }

    #[test]
    fn test_anchor_without_href_and_other_tags_ignored() {
        let html = r#"
            <a name="top">no href</a>
            <link href="/style.css">
            <img src="/logo.png">
            <a href="/real"/>
        "#;
        assert_eq!(
            links("https://example.com/", html),
            vec!["https://example.com/real"]
        );
    }

    #[test]
    fn test_malformed_markup_still_yields_links() {
        let html = "<div><a href='/one'>one<p><a href='/two'>two</div";
        assert_eq!(
            links("https://example.com/", html),
            vec!["https://example.com/one", "https://example.com/two"]
        );
    }

    #[test]
    fn test_non_utf8_body() {
        let mut body = b"<a href=\"/ok\">".to_vec();
        body.extend_from_slice(&[0xff, 0xfe]);
        let page = Url::parse("https://example.com/").unwrap();
        let found = extract_links(&page, &body);
        assert_eq!(found.len(), 1);
    }
}
