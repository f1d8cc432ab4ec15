//! Argument parsing and dispatch for the `pinboard` binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pinboard_core::{CrawlConfig, CrawlMode, PinboardScraper};

use crate::commands;

/// Top-level CLI for the pinboard image scraper.
#[derive(Debug, Parser)]
#[command(name = "pinboard")]
#[command(about = "Save the largest image of every pin on a board", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    /// TOML file with crawl settings; flags below override it.
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory under which board folders are created.
    #[arg(long, short = 'o', global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Substring a link's host must contain to be followed.
    #[arg(long, short = 'd', global = true, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Pin pages processed concurrently per board.
    #[arg(long, short = 'w', global = true, value_name = "N")]
    pub workers: Option<usize>,

    /// Path substring that marks a pin page.
    #[arg(long, global = true, value_name = "MARKER")]
    pub pin_marker: Option<String>,

    /// Print the final report as JSON on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug-level crawl logging.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Save the largest image of a single pin page.
    Page {
        /// Pin page URL.
        url: String,
    },

    /// Save the thumbnail declared in a pin page's container.
    Thumbnail {
        /// Pin page URL.
        url: String,
    },

    /// Save the largest image of every pin linked from a board page.
    Gallery {
        /// Board or gallery page URL.
        url: String,
    },

    /// Crawl every board of a user, one board at a time.
    UserBoards {
        /// Profile URL, shaped like https://host/user/<username>/.
        url: String,
    },
}

impl CliCommand {
    pub fn mode(&self) -> CrawlMode {
        match self {
            CliCommand::Page { .. } => CrawlMode::SinglePage,
            CliCommand::Thumbnail { .. } => CrawlMode::Thumbnail,
            CliCommand::Gallery { .. } => CrawlMode::Gallery,
            CliCommand::UserBoards { .. } => CrawlMode::UserBoards,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            CliCommand::Page { url }
            | CliCommand::Thumbnail { url }
            | CliCommand::Gallery { url }
            | CliCommand::UserBoards { url } => url,
        }
    }
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn crawl_config(&self) -> Result<CrawlConfig> {
        let mut cfg = match &self.config {
            Some(path) => CrawlConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CrawlConfig::default(),
        };

        if let Some(output) = &self.output {
            cfg.output_root = output.clone();
        }
        if let Some(domain) = &self.domain {
            cfg.domain_filter = domain.clone();
        }
        if let Some(workers) = self.workers {
            cfg.max_workers = workers;
        }
        if let Some(marker) = &self.pin_marker {
            cfg.pin_marker = marker.clone();
        }

        Ok(cfg)
    }

    pub async fn run(&self) -> Result<()> {
        let cfg = self.crawl_config()?;
        tracing::debug!("crawl config: {:?}", cfg);

        let scraper = PinboardScraper::with_config(cfg).context("building HTTP client")?;
        let report = scraper
            .run(self.command.mode(), self.command.url())
            .await
            .with_context(|| format!("crawling {}", self.command.url()))?;

        commands::print_report(&report, self.json)?;
        commands::ensure_success(&report)
    }
}
