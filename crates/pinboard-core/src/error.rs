//! Error types for the pinboard scraper
//!
//! Every failure in the crawl pipeline is a value of [`PinboardError`].
//! Callers branch on [`PinboardError::kind`] instead of matching messages.

use std::path::PathBuf;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all pinboard scraper operations
#[derive(Error, Debug)]
pub enum PinboardError {
    /// HTTP request failed before a response arrived (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Expected HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Page had no downloadable image
    #[error("No image found on {0}")]
    NoImageFound(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A required identifier could not be derived (username, filename)
    #[error("Could not extract {0}")]
    ExtractionFailed(String),

    /// Every `<name>_<n>` candidate for an output folder is taken
    #[error("No free folder name for {}", .0.display())]
    FolderExhausted(PathBuf),

    /// Local filesystem error
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse failure category of a [`PinboardError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Parse,
    FilesystemConflict,
    Extraction,
    Filesystem,
}

impl PinboardError {
    /// Category used by callers to decide how to continue
    pub fn kind(&self) -> ErrorKind {
        match self {
            PinboardError::HttpError(_) | PinboardError::HttpStatus { .. } => ErrorKind::Network,
            PinboardError::ParseError(_)
            | PinboardError::ElementNotFound(_)
            | PinboardError::NoImageFound(_) => ErrorKind::Parse,
            PinboardError::InvalidUrl(_) | PinboardError::ExtractionFailed(_) => {
                ErrorKind::Extraction
            }
            PinboardError::FolderExhausted(_) => ErrorKind::FilesystemConflict,
            PinboardError::Io(_) => ErrorKind::Filesystem,
        }
    }
}

impl Serialize for PinboardError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for pinboard operations
pub type Result<T> = std::result::Result<T, PinboardError>;
