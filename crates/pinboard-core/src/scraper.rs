//! Main scraper API for pinboard sites
//!
//! Combines the HTTP client, link filters and the per-pin image selector
//! into single-pin, board and user-wide crawls.

use std::path::Path;

use tokio::task::JoinSet;
use tracing::{error, info, warn};
use url::Url;

use crate::client::PinboardClient;
use crate::config::CrawlConfig;
use crate::error::{PinboardError, Result};
use crate::parser::extract_links;
use crate::selector::{download_largest_image, download_thumbnail};
use crate::storage::create_unique_folder;
use crate::types::{
    BoardOutcome, BoardReport, CrawlMode, CrawlReport, DownloadResult, UserBoardsReport,
};
use crate::url::{board_folder_name, extract_username, filter_pin_links, filter_user_boards};

/// Main scraper API
///
/// Holds one HTTP client and the crawl settings. Every crawl owns its
/// worker pool and waits for all of its tasks before returning.
pub struct PinboardScraper {
    client: PinboardClient,
    config: CrawlConfig,
}

impl PinboardScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(CrawlConfig::default())
    }

    /// Create a new scraper with custom configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: CrawlConfig) -> Result<Self> {
        let client = PinboardClient::with_config(&config.client)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Run one crawl of the given shape from a seed URL
    ///
    /// # Errors
    /// Board-level failures of a gallery or user-wide crawl (see
    /// [`Self::crawl_board`] and [`Self::crawl_user_boards`]). Single-pin
    /// modes report their failure inside the returned [`DownloadResult`].
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> pinboard_core::Result<()> {
    /// use pinboard_core::{CrawlConfig, CrawlMode, PinboardScraper};
    /// let config = CrawlConfig {
    ///     domain_filter: "example.com".to_string(),
    ///     max_workers: 10,
    ///     ..CrawlConfig::default()
    /// };
    /// let scraper = PinboardScraper::with_config(config)?;
    /// let report = scraper
    ///     .run(CrawlMode::Gallery, "https://www.example.com/user/alice/cats/")
    ///     .await?;
    /// println!("{:?}", report);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(&self, mode: CrawlMode, seed_url: &str) -> Result<CrawlReport> {
        let report = match mode {
            CrawlMode::SinglePage => CrawlReport::SinglePage(self.download_page(seed_url).await),
            CrawlMode::Thumbnail => CrawlReport::Thumbnail(self.download_thumbnail(seed_url).await),
            CrawlMode::Gallery => CrawlReport::Gallery(self.crawl_board(seed_url).await?),
            CrawlMode::UserBoards => {
                CrawlReport::UserBoards(self.crawl_user_boards(seed_url).await?)
            }
        };
        Ok(report)
    }

    /// Save the largest image of one pin page into the output root
    pub async fn download_page(&self, pin_url: &str) -> DownloadResult {
        let root = self.config.output_root.as_path();
        let outcome = match tokio::fs::create_dir_all(root).await {
            Ok(()) => download_largest_image(&self.client, pin_url, root).await,
            Err(e) => Err(PinboardError::Io(e)),
        };
        let result = DownloadResult {
            pin_url: pin_url.to_string(),
            outcome,
        };
        log_result(&result);
        result
    }

    /// Save the thumbnail of one pin page into the output root
    pub async fn download_thumbnail(&self, pin_url: &str) -> DownloadResult {
        let root = self.config.output_root.as_path();
        let outcome = match tokio::fs::create_dir_all(root).await {
            Ok(()) => download_thumbnail(&self.client, pin_url, root).await,
            Err(e) => Err(PinboardError::Io(e)),
        };
        let result = DownloadResult {
            pin_url: pin_url.to_string(),
            outcome,
        };
        log_result(&result);
        result
    }

    /// Crawl every pin linked from a board page
    ///
    /// Pin links are filtered by the configured domain and pin marker, a
    /// fresh output folder is created under the output root, and up to
    /// `max_workers` pins are processed at once. A failing pin never
    /// affects its siblings.
    ///
    /// # Errors
    /// - `InvalidUrl` if `board_url` is not an absolute URL
    /// - `HttpStatus` / `HttpError` if the board page cannot be fetched
    /// - `FolderExhausted` / `Io` if the output folder cannot be created
    pub async fn crawl_board(&self, board_url: &str) -> Result<BoardReport> {
        let page_url =
            Url::parse(board_url).map_err(|_| PinboardError::InvalidUrl(board_url.to_string()))?;

        info!(board = board_url, "scanning board page");
        let html = self.client.fetch_page(board_url).await.inspect_err(|e| {
            error!(board = board_url, error = %e, "failed to load board");
        })?;

        let links = extract_links(&html, &page_url)?;
        let pins = filter_pin_links(
            &links.anchors,
            &self.config.domain_filter,
            &self.config.pin_marker,
        );
        let pins_found = pins.len();
        info!(board = board_url, pins = pins_found, "found pin pages");

        let folder =
            create_unique_folder(&self.config.output_root, &board_folder_name(&page_url)).await?;
        info!(folder = %folder.display(), "saving images");

        let workers = self.config.workers();
        let mut pending = pins.into_iter();
        let mut join_set = JoinSet::new();
        let mut results = Vec::with_capacity(pins_found);
        let mut aborted = 0;

        loop {
            while join_set.len() < workers {
                let Some(pin_url) = pending.next() else {
                    break;
                };
                let client = self.client.clone();
                let folder = folder.clone();
                join_set.spawn(async move {
                    let outcome = download_largest_image(&client, &pin_url, &folder).await;
                    DownloadResult { pin_url, outcome }
                });
            }

            let Some(joined) = join_set.join_next().await else {
                break;
            };
            match joined {
                Ok(result) => {
                    log_result(&result);
                    results.push(result);
                }
                Err(e) => {
                    error!(board = board_url, error = %e, "pin task aborted");
                    aborted += 1;
                }
            }
        }

        let report = BoardReport {
            board_url: board_url.to_string(),
            folder,
            pins_found,
            results,
            aborted,
        };
        info!(
            board = board_url,
            saved = report.saved(),
            skipped = report.skipped(),
            failed = report.failed(),
            "board finished"
        );
        Ok(report)
    }

    /// Crawl every board of the user owning a profile page
    ///
    /// Boards are the profile's links shaped `/user/<username>/<board>`;
    /// they are crawled one after another in sorted order. A failing board
    /// is recorded and the next one proceeds.
    ///
    /// # Errors
    /// - `InvalidUrl` if `profile_url` is not an absolute URL
    /// - `ExtractionFailed` if the URL has no username segment
    /// - `HttpStatus` / `HttpError` if the profile page cannot be fetched
    pub async fn crawl_user_boards(&self, profile_url: &str) -> Result<UserBoardsReport> {
        let page_url = Url::parse(profile_url)
            .map_err(|_| PinboardError::InvalidUrl(profile_url.to_string()))?;
        let username = extract_username(&page_url).inspect_err(|e| {
            error!(profile = profile_url, error = %e, "no username in profile URL");
        })?;

        info!(profile = profile_url, user = %username, "scanning user page");
        let html = self.client.fetch_page(profile_url).await.inspect_err(|e| {
            error!(profile = profile_url, error = %e, "failed to load user page");
        })?;

        let links = extract_links(&html, &page_url)?;
        let boards = filter_user_boards(&links.anchors, &username, &self.config.domain_filter);
        let total = boards.len();
        info!(user = %username, boards = total, "found boards");

        let mut outcomes = Vec::with_capacity(total);
        for (i, board_url) in boards.into_iter().enumerate() {
            info!(board = %board_url, "[{}/{}] crawling board", i + 1, total);
            let outcome = self.crawl_board(&board_url).await;
            outcomes.push(BoardOutcome { board_url, outcome });
        }

        Ok(UserBoardsReport {
            username,
            boards: outcomes,
        })
    }

    /// Output root the crawls write under
    pub fn output_root(&self) -> &Path {
        &self.config.output_root
    }
}

fn log_result(result: &DownloadResult) {
    match &result.outcome {
        Ok(saved) if saved.already_existed => {
            info!(pin = %result.pin_url, path = %saved.path.display(), "image already present")
        }
        Ok(saved) => {
            info!(pin = %result.pin_url, path = %saved.path.display(), size = saved.size, "pin saved")
        }
        Err(PinboardError::NoImageFound(_)) => warn!(pin = %result.pin_url, "no image found"),
        Err(e) => warn!(pin = %result.pin_url, error = %e, kind = ?e.kind(), "pin failed"),
    }
}
