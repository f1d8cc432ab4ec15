//! Core data types for the pinboard scraper
//!
//! Results of single pin downloads, board crawls and user-wide crawls.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PinboardError;

/// Which crawl entry shape to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrawlMode {
    /// Largest image of one pin page
    SinglePage,
    /// Thumbnail declared in the pin container of one pin page
    Thumbnail,
    /// Every pin linked from one board page
    #[default]
    Gallery,
    /// Every board of one user, one after another
    UserBoards,
}

/// An image body fetched while choosing the largest one on a pin page
#[derive(Debug, Clone)]
pub struct ImageCandidate {
    pub url: url::Url,
    pub bytes: Vec<u8>,
}

impl ImageCandidate {
    /// Size of the downloaded body in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// An image stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedImage {
    /// Where the image lives
    pub path: PathBuf,
    /// URL the bytes were downloaded from
    pub source_url: String,
    /// Size of the downloaded body in bytes
    pub size: u64,
    /// A file with the same name was already there and was left untouched
    pub already_existed: bool,
}

/// Outcome of one pin page
#[derive(Debug, Serialize)]
pub struct DownloadResult {
    pub pin_url: String,
    #[serde(serialize_with = "serialize_outcome")]
    pub outcome: Result<SavedImage, PinboardError>,
}

impl DownloadResult {
    pub fn is_saved(&self) -> bool {
        matches!(&self.outcome, Ok(saved) if !saved.already_existed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(&self.outcome, Ok(saved) if saved.already_existed)
    }
}

/// Outcome of one board crawl
#[derive(Debug, Serialize)]
pub struct BoardReport {
    pub board_url: String,
    /// Output folder created for this crawl
    pub folder: PathBuf,
    /// Distinct pin links found on the board page
    pub pins_found: usize,
    /// One entry per pin, in completion order
    pub results: Vec<DownloadResult>,
    /// Pin tasks that panicked instead of returning a result
    pub aborted: usize,
}

impl BoardReport {
    /// Pins whose image was newly written
    pub fn saved(&self) -> usize {
        self.results.iter().filter(|r| r.is_saved()).count()
    }

    /// Pins whose image file already existed
    pub fn skipped(&self) -> usize {
        self.results.iter().filter(|r| r.is_skipped()).count()
    }

    /// Pins that produced no image
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_err()).count() + self.aborted
    }
}

/// Outcome of one board within a user-wide crawl
#[derive(Debug, Serialize)]
pub struct BoardOutcome {
    pub board_url: String,
    #[serde(serialize_with = "serialize_outcome")]
    pub outcome: Result<BoardReport, PinboardError>,
}

/// Outcome of a user-wide crawl
#[derive(Debug, Serialize)]
pub struct UserBoardsReport {
    pub username: String,
    /// Boards in the order they were crawled
    pub boards: Vec<BoardOutcome>,
}

/// Outcome of [`crate::PinboardScraper::run`]
#[derive(Debug, Serialize)]
#[serde(tag = "mode", content = "report", rename_all = "kebab-case")]
pub enum CrawlReport {
    SinglePage(DownloadResult),
    Thumbnail(DownloadResult),
    Gallery(BoardReport),
    UserBoards(UserBoardsReport),
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum OutcomeRef<'a, T> {
    Ok(&'a T),
    Err {
        kind: crate::error::ErrorKind,
        message: &'a PinboardError,
    },
}

fn serialize_outcome<T, S>(
    outcome: &Result<T, PinboardError>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: serde::Serializer,
{
    let view = match outcome {
        Ok(value) => OutcomeRef::Ok(value),
        Err(error) => OutcomeRef::Err {
            kind: error.kind(),
            message: error,
        },
    };
    view.serialize(serializer)
}
