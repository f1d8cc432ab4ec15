//! Pin thumbnail parser
//!
//! Pin pages carry a `div.pin_container` with a schema.org
//! `<meta itemprop="thumbnailUrl">` pointing at the pin's image.

use scraper::{Html, Selector};
use url::Url;

use super::links::resolve;
use crate::error::{PinboardError, Result};

/// Parses a pin page and returns the thumbnail image URL
///
/// # Errors
/// - `ElementNotFound` if the pin container or the thumbnail meta tag is missing
/// - `InvalidUrl` if the `content` attribute cannot be resolved
pub fn parse_thumbnail_url(html: &str, base: &Url) -> Result<Url> {
    let document = Html::parse_document(html);

    let container_selector = Selector::parse("div.pin_container")
        .map_err(|_| PinboardError::ParseError("Invalid selector".to_string()))?;
    let meta_selector = Selector::parse(r#"meta[itemprop="thumbnailUrl"]"#)
        .map_err(|_| PinboardError::ParseError("Invalid selector".to_string()))?;

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| PinboardError::ElementNotFound("div.pin_container".to_string()))?;

    let content = container
        .select(&meta_selector)
        .find_map(|meta| meta.value().attr("content"))
        .ok_or_else(|| PinboardError::ElementNotFound("meta[itemprop=thumbnailUrl]".to_string()))?;

    resolve(base, content).ok_or_else(|| PinboardError::InvalidUrl(content.to_string()))
}
