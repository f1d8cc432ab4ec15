//! Per-pin image selection
//!
//! Fetches every image referenced by a pin page and keeps the one with the
//! largest body, or reads the thumbnail the page declares, then stores it
//! in the board's output folder.

use std::path::Path;

use tracing::{debug, info, warn};
use url::Url;

use crate::client::PinboardClient;
use crate::error::{PinboardError, Result};
use crate::parser::{extract_image_sources, parse_thumbnail_url};
use crate::storage::save_if_absent;
use crate::types::{ImageCandidate, SavedImage};
use crate::url::image_filename;

/// Keeps whichever of `best` and `candidate` has the strictly larger body
///
/// On a tie the earlier `best` stays. Empty bodies never win.
pub fn keep_largest(best: Option<ImageCandidate>, candidate: ImageCandidate) -> Option<ImageCandidate> {
    if candidate.is_empty() {
        return best;
    }
    let threshold = best.as_ref().map_or(0, ImageCandidate::len);
    if candidate.len() > threshold {
        Some(candidate)
    } else {
        best
    }
}

/// Fetches each image sequentially and returns the largest one
///
/// Images that fail to download are skipped.
pub async fn fetch_largest(client: &PinboardClient, images: &[Url]) -> Option<ImageCandidate> {
    let mut best = None;

    for image_url in images {
        match client.fetch_bytes(image_url.as_str()).await {
            Ok(bytes) => {
                debug!(url = %image_url, size = bytes.len(), "fetched image candidate");
                best = keep_largest(
                    best,
                    ImageCandidate {
                        url: image_url.clone(),
                        bytes,
                    },
                );
            }
            Err(e) => debug!(url = %image_url, error = %e, "skipping image candidate"),
        }
    }

    best
}

/// Downloads the largest image of a pin page into `output_dir`
///
/// # Errors
/// - `InvalidUrl` if `pin_url` is not an absolute URL
/// - `HttpStatus` / `HttpError` if the pin page cannot be fetched
/// - `NoImageFound` if the page has no image or none could be downloaded
/// - `ExtractionFailed` if the winning URL has no file name
/// - `Io` if the file cannot be written
pub async fn download_largest_image(
    client: &PinboardClient,
    pin_url: &str,
    output_dir: &Path,
) -> Result<SavedImage> {
    let page_url = Url::parse(pin_url).map_err(|_| PinboardError::InvalidUrl(pin_url.to_string()))?;

    let html = client.fetch_page(pin_url).await?;
    let images = extract_image_sources(&html, &page_url)?;
    debug!(pin = pin_url, images = images.len(), "checking image sizes");

    let winner = fetch_largest(client, &images)
        .await
        .ok_or_else(|| PinboardError::NoImageFound(pin_url.to_string()))?;

    store(winner, output_dir).await
}

/// Downloads the thumbnail declared in a pin page's container into `output_dir`
///
/// # Errors
/// - `ElementNotFound` if the page has no pin container or thumbnail tag
/// - `HttpStatus` / `HttpError` if the page or the image cannot be fetched
/// - `ExtractionFailed` if the thumbnail URL has no file name
pub async fn download_thumbnail(
    client: &PinboardClient,
    pin_url: &str,
    output_dir: &Path,
) -> Result<SavedImage> {
    let page_url = Url::parse(pin_url).map_err(|_| PinboardError::InvalidUrl(pin_url.to_string()))?;

    let html = client.fetch_page(pin_url).await?;
    let thumbnail_url = parse_thumbnail_url(&html, &page_url)?;
    debug!(pin = pin_url, thumbnail = %thumbnail_url, "found thumbnail");

    let bytes = client.fetch_bytes(thumbnail_url.as_str()).await?;

    store(
        ImageCandidate {
            url: thumbnail_url,
            bytes,
        },
        output_dir,
    )
    .await
}

async fn store(image: ImageCandidate, output_dir: &Path) -> Result<SavedImage> {
    let filename = image_filename(&image.url)
        .ok_or_else(|| PinboardError::ExtractionFailed(format!("file name from {}", image.url)))?;

    let size = image.len() as u64;
    let source_url = image.url.to_string();
    let (path, already_existed) = save_if_absent(output_dir, &filename, image.bytes).await?;

    if already_existed {
        warn!(path = %path.display(), "file already exists, keeping it");
    } else {
        info!(path = %path.display(), size, "saved image");
    }

    Ok(SavedImage {
        path,
        source_url,
        size,
        already_existed,
    })
}
