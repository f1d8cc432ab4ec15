//! URL helper functions for pinboard pages
//!
//! Link filters for pin and board pages, plus the names derived from URL
//! paths (username, board folder, image filename).

use std::collections::BTreeSet;

use url::Url;

use crate::error::{PinboardError, Result};

/// Path substring that identifies a pin page
pub const DEFAULT_PIN_MARKER: &str = "/pin/";

/// Folder name used when a board URL has no path segments
pub const FALLBACK_FOLDER_NAME: &str = "gallery";

/// Checks whether an http(s) URL's host contains the domain filter
///
/// Other schemes (`ftp:`, `ws:`, `mailto:`, `data:`) never match.
pub fn host_matches(url: &Url, domain_filter: &str) -> bool {
    matches!(url.scheme(), "http" | "https")
        && url
            .host_str()
            .is_some_and(|host| host.contains(domain_filter))
}

/// Keeps pin page URLs that match the domain filter and the pin marker
///
/// # Arguments
/// * `urls` - Absolute URLs, usually the anchors of a board page
/// * `domain_filter` - Substring the host must contain (e.g., "example.com")
/// * `pin_marker` - Substring the path must contain (e.g., "/pin/")
///
/// # Returns
/// Deduplicated URLs in sorted order
///
/// # Example
/// ```
/// use pinboard_core::url::filter_pin_links;
/// use url::Url;
/// let urls = [
///     Url::parse("https://example.com/about").unwrap(),
///     Url::parse("https://example.com/pin/12345").unwrap(),
/// ];
/// let pins = filter_pin_links(&urls, "example.com", "/pin/");
/// assert_eq!(pins.into_iter().collect::<Vec<_>>(), vec!["https://example.com/pin/12345"]);
/// ```
pub fn filter_pin_links<'a, I>(urls: I, domain_filter: &str, pin_marker: &str) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Url>,
{
    urls.into_iter()
        .filter(|url| host_matches(url, domain_filter) && url.path().contains(pin_marker))
        .map(|url| url.to_string())
        .collect()
}

/// Splits a URL path into its segments, ignoring leading and trailing slashes
fn trimmed_segments(url: &Url) -> Vec<&str> {
    let path = url.path().trim_matches('/');
    if path.is_empty() {
        return Vec::new();
    }
    path.split('/').collect()
}

/// Extracts the username from a profile URL
///
/// The username is the second path segment, as in `/user/<username>/`.
///
/// # Errors
/// Returns `ExtractionFailed` if the path has no non-empty second segment
///
/// # Example
/// ```
/// use pinboard_core::url::extract_username;
/// use url::Url;
/// let url = Url::parse("https://www.example.com/user/reddaddy/").unwrap();
/// assert_eq!(extract_username(&url).unwrap(), "reddaddy");
/// ```
pub fn extract_username(profile_url: &Url) -> Result<String> {
    trimmed_segments(profile_url)
        .get(1)
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .ok_or_else(|| PinboardError::ExtractionFailed("username".to_string()))
}

/// Keeps board URLs shaped `/user/<username>/<board>` on a matching host
///
/// # Returns
/// Deduplicated board URLs in sorted order
pub fn filter_user_boards<'a, I>(urls: I, username: &str, domain_filter: &str) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Url>,
{
    urls.into_iter()
        .filter(|url| host_matches(url, domain_filter))
        .filter(|url| {
            matches!(
                trimmed_segments(url).as_slice(),
                ["user", user, board] if *user == username && !board.is_empty()
            )
        })
        .map(|url| url.to_string())
        .collect()
}

/// Derives the output folder name of a board from its last path segment
///
/// # Example
/// ```
/// use pinboard_core::url::board_folder_name;
/// use url::Url;
/// let url = Url::parse("https://www.example.com/user/alice/cats/").unwrap();
/// assert_eq!(board_folder_name(&url), "cats");
/// let root = Url::parse("https://www.example.com/").unwrap();
/// assert_eq!(board_folder_name(&root), "gallery");
/// ```
pub fn board_folder_name(board_url: &Url) -> String {
    board_url
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or(FALLBACK_FOLDER_NAME)
        .to_string()
}

/// Derives the file name of a downloaded image from its URL
///
/// Query string and fragment are dropped; the final path segment is used.
///
/// # Returns
/// `None` if the path ends with `/` or is empty
pub fn image_filename(image_url: &Url) -> Option<String> {
    image_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
