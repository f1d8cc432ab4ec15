//! Anchor and image link extraction
//!
//! Parses a fetched page and resolves every `<a href>` and `<img src>`
//! against the page URL.

use scraper::{Html, Selector};
use url::Url;

use crate::error::{PinboardError, Result};

/// Absolute links found on one page, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// Resolved `<a href>` targets
    pub anchors: Vec<Url>,
    /// Resolved `<img src>` sources
    pub images: Vec<Url>,
}

/// Parses page HTML and returns its anchor targets and image sources
///
/// Relative references are resolved against `base`. Missing, empty or
/// unresolvable attributes are skipped.
///
/// # Errors
/// Returns `ParseError` only if a built-in selector fails to compile
pub fn extract_links(html: &str, base: &Url) -> Result<PageLinks> {
    let document = Html::parse_document(html);

    Ok(PageLinks {
        anchors: collect_attr(&document, "a[href]", "href", base)?,
        images: collect_attr(&document, "img", "src", base)?,
    })
}

/// Image sources only, for pin pages where anchors are irrelevant
pub fn extract_image_sources(html: &str, base: &Url) -> Result<Vec<Url>> {
    let document = Html::parse_document(html);
    collect_attr(&document, "img", "src", base)
}

fn collect_attr(document: &Html, css: &str, attr: &str, base: &Url) -> Result<Vec<Url>> {
    let selector = Selector::parse(css)
        .map_err(|e| PinboardError::ParseError(format!("Invalid selector: {:?}", e)))?;

    let urls = document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter_map(|value| resolve(base, value))
        .collect();

    Ok(urls)
}

/// Resolves a raw attribute value against the page URL
///
/// Returns `None` for empty values and references the URL parser rejects.
pub fn resolve(base: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    base.join(reference).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.example.com/user/alice/cats/").unwrap()
    }

    #[test]
    fn test_extract_links_empty_html() {
        let links = extract_links("<html><body></body></html>", &base()).unwrap();
        assert!(links.anchors.is_empty());
        assert!(links.images.is_empty());
    }

    #[test]
    fn test_extract_links_resolves_relative() {
        let html = r#"
        <html><body>
            <a href="/pin/1">one</a>
            <a href="../dogs/">dogs</a>
            <a href="https://cdn.example.org/x">abs</a>
            <img src="thumb.jpg">
            <img src="//img.example.com/big.png?w=800">
        </body></html>
        "#;

        let links = extract_links(html, &base()).unwrap();
        let anchors: Vec<&str> = links.anchors.iter().map(Url::as_str).collect();
        assert_eq!(
            anchors,
            vec![
                "https://www.example.com/pin/1",
                "https://www.example.com/user/alice/dogs/",
                "https://cdn.example.org/x",
            ]
        );

        let images: Vec<&str> = links.images.iter().map(Url::as_str).collect();
        assert_eq!(
            images,
            vec![
                "https://www.example.com/user/alice/cats/thumb.jpg",
                "https://img.example.com/big.png?w=800",
            ]
        );
    }

    #[test]
    fn test_extract_links_skips_missing_and_empty_attributes() {
        let html = r#"
        <a>no href</a>
        <a href="">empty</a>
        <a href="   ">blank</a>
        <img alt="no src">
        <img src="">
        <img src="ok.gif">
        "#;

        let links = extract_links(html, &base()).unwrap();
        assert!(links.anchors.is_empty());
        assert_eq!(links.images.len(), 1);
        assert_eq!(
            links.images[0].as_str(),
            "https://www.example.com/user/alice/cats/ok.gif"
        );
    }

    #[test]
    fn test_extract_links_skips_unresolvable() {
        let html = r#"<a href="http://[::1">broken</a><a href="/pin/2">ok</a>"#;
        let links = extract_links(html, &base()).unwrap();
        assert_eq!(links.anchors.len(), 1);
        assert_eq!(links.anchors[0].path(), "/pin/2");
    }

    #[test]
    fn test_extract_image_sources_document_order() {
        let html = r#"<img src="/a.jpg"><div><img src="/b.jpg"></div><img src="/a.jpg">"#;
        let images = extract_image_sources(html, &base()).unwrap();
        let paths: Vec<&str> = images.iter().map(Url::path).collect();
        assert_eq!(paths, vec!["/a.jpg", "/b.jpg", "/a.jpg"]);
    }
}
