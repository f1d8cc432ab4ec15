//! Crawl configuration
//!
//! Defaults match the values the crawler was tuned with; any field can be
//! overridden from a TOML file and then from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::client::ClientConfig;
use crate::error::{PinboardError, Result};
use crate::url::DEFAULT_PIN_MARKER;

/// Default number of pin pages processed at once
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Settings shared by every crawl mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Substring a link's host must contain to be followed
    pub domain_filter: String,
    /// Substring a link's path must contain to count as a pin page
    pub pin_marker: String,
    /// Pin pages processed concurrently within one board
    pub max_workers: usize,
    /// Directory under which board folders are created
    pub output_root: PathBuf,
    /// HTTP client settings
    pub client: ClientConfig,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            domain_filter: "example.com".to_string(),
            pin_marker: DEFAULT_PIN_MARKER.to_string(),
            max_workers: DEFAULT_MAX_WORKERS,
            output_root: PathBuf::from("."),
            client: ClientConfig::default(),
        }
    }
}

impl CrawlConfig {
    /// Load configuration from a TOML file
    ///
    /// Missing keys keep their default values.
    ///
    /// # Errors
    /// - `Io` if the file cannot be read
    /// - `ParseError` if the file is not valid TOML for this schema
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| PinboardError::ParseError(format!("config: {}", e)))
    }

    /// Worker count clamped to at least one
    pub fn workers(&self) -> usize {
        self.max_workers.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let cfg = CrawlConfig::default();
        assert_eq!(cfg.domain_filter, "example.com");
        assert_eq!(cfg.pin_marker, "/pin/");
        assert_eq!(cfg.max_workers, 8);
        assert_eq!(cfg.output_root, PathBuf::from("."));
        assert_eq!(cfg.client, ClientConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = CrawlConfig::from_toml(
            r#"
            domain_filter = "pins.test"
            max_workers = 3

            [client]
            image_timeout_secs = 4
            "#,
        )
        .unwrap();

        assert_eq!(cfg.domain_filter, "pins.test");
        assert_eq!(cfg.max_workers, 3);
        assert_eq!(cfg.pin_marker, "/pin/");
        assert_eq!(cfg.client.image_timeout_secs, 4);
        assert_eq!(cfg.client.page_timeout_secs, 15);
    }

    #[test]
    fn test_invalid_toml() {
        let result = CrawlConfig::from_toml("max_workers = \"many\"");
        match result {
            Err(PinboardError::ParseError(msg)) => assert!(msg.starts_with("config:")),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pinboard.toml");
        fs::write(&path, "output_root = \"downloads\"\n").unwrap();

        let cfg = CrawlConfig::from_file(&path).unwrap();
        assert_eq!(cfg.output_root, PathBuf::from("downloads"));
    }

    #[test]
    fn test_from_missing_file() {
        let result = CrawlConfig::from_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(PinboardError::Io(_))));
    }

    #[test]
    fn test_workers_clamped() {
        let cfg = CrawlConfig {
            max_workers: 0,
            ..CrawlConfig::default()
        };
        assert_eq!(cfg.workers(), 1);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let cfg = CrawlConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(CrawlConfig::from_toml(&text).unwrap(), cfg);
    }
}
