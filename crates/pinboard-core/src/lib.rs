//! Pinboard Scraper Core Library
//!
//! Crawls pinboard-style sites and saves the main image of every pin page
//! into one folder per board.
//!
//! # Overview
//!
//! This crate provides:
//! - An HTTP fetcher with a fixed User-Agent and per-call timeouts
//! - HTML parsers for anchor/image links and pin thumbnails
//! - Link filters for pin pages and user boards
//! - A largest-image selector that keeps the biggest body on a pin page
//! - Board and user-wide crawlers running pins on a bounded worker pool
//!
//! # Example
//!
//! ```no_run
//! use pinboard_core::{CrawlConfig, PinboardScraper, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = PinboardScraper::with_config(CrawlConfig::default())?;
//!
//!     let report = scraper
//!         .crawl_board("https://www.example.com/user/alice/cats/")
//!         .await?;
//!
//!     for result in &report.results {
//!         match &result.outcome {
//!             Ok(saved) => println!("{} -> {}", result.pin_url, saved.path.display()),
//!             Err(e) => println!("{} failed: {}", result.pin_url, e),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failures
//!
//! Nothing in the crawl pipeline panics on bad input or network trouble.
//! Per-pin failures are recorded in [`DownloadResult::outcome`]; only
//! board-level failures (board page unreachable, no output folder) are
//! returned as `Err`.

mod client;
pub mod config;
mod error;
pub mod parser;
mod scraper;
pub mod selector;
pub mod storage;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, PinboardClient};

// Re-export configuration
pub use config::{CrawlConfig, DEFAULT_MAX_WORKERS};

// Re-export error types
pub use error::{ErrorKind, PinboardError, Result};

// Re-export parser functions
pub use parser::{PageLinks, extract_image_sources, extract_links, parse_thumbnail_url};

// Re-export main scraper API
pub use scraper::PinboardScraper;

// Re-export data types
pub use types::{
    BoardOutcome, BoardReport, CrawlMode, CrawlReport, DownloadResult, ImageCandidate, SavedImage,
    UserBoardsReport,
};

// Re-export URL helper functions for convenience
pub use self::url::{board_folder_name, extract_username, filter_pin_links, filter_user_boards};
