//! HTML parsers for pinboard pages
//!
//! Contains modules for parsing different page types.

pub mod links;
pub mod thumbnail;

pub use links::{PageLinks, extract_image_sources, extract_links};
pub use thumbnail::parse_thumbnail_url;
