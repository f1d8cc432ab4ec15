//! HTTP fetcher for pin, board and image pages
//!
//! One GET per call with a fixed User-Agent and a per-call timeout.
//! Non-2xx responses and transport errors come back as [`PinboardError`]
//! values; nothing is retried.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PinboardError, Result};

const USER_AGENT: &str = "Mozilla/5.0";

/// Configuration for the HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Timeout for HTML pages in seconds (default: 15)
    pub page_timeout_secs: u64,
    /// Timeout for each image download in seconds (default: 10)
    pub image_timeout_secs: u64,
    /// User-Agent header sent with every request (default: "Mozilla/5.0")
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: 15,
            image_timeout_secs: 10,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// HTTP client wrapper
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection
/// pool, so every pin task gets its own handle.
#[derive(Debug, Clone)]
pub struct PinboardClient {
    client: reqwest::Client,
    page_timeout: Duration,
    image_timeout: Duration,
}

impl PinboardClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(PinboardError::HttpError)?;

        Ok(Self {
            client,
            page_timeout: Duration::from_secs(config.page_timeout_secs),
            image_timeout: Duration::from_secs(config.image_timeout_secs),
        })
    }

    /// Fetch an HTML page as text
    ///
    /// # Errors
    /// - `HttpStatus` - server answered with a non-2xx status
    /// - `HttpError` - connection, timeout or body decoding failure
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.get(url, self.page_timeout).await?;
        response.text().await.map_err(PinboardError::HttpError)
    }

    /// Fetch raw bytes, used for image candidates
    ///
    /// Uses the shorter image timeout.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url, self.image_timeout).await?;
        let bytes = response.bytes().await.map_err(PinboardError::HttpError)?;
        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &str, timeout: Duration) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(PinboardError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PinboardError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.page_timeout_secs, 15);
        assert_eq!(config.image_timeout_secs, 10);
        assert_eq!(config.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn test_client_creation() {
        let client = PinboardClient::new().unwrap();
        assert_eq!(client.page_timeout, Duration::from_secs(15));
        assert_eq!(client.image_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig {
            page_timeout_secs: 30,
            image_timeout_secs: 5,
            user_agent: "test-agent".to_string(),
        };
        let client = PinboardClient::with_config(&config).unwrap();
        assert_eq!(client.page_timeout, Duration::from_secs(30));
        assert_eq!(client.image_timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_fetch_page_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/board"))
            .and(header("user-agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = PinboardClient::new().unwrap();
        let body = client
            .fetch_page(&format!("{}/board", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn test_fetch_page_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = PinboardClient::new().unwrap();
        let url = format!("{}/missing", server.uri());
        match client.fetch_page(&url).await {
            Err(PinboardError::HttpStatus { url: got, status }) => {
                assert_eq!(status, 404);
                assert_eq!(got, url);
            }
            other => panic!("Expected HttpStatus error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 64]))
            .mount(&server)
            .await;

        let client = PinboardClient::new().unwrap();
        let bytes = client
            .fetch_bytes(&format!("{}/img.jpg", server.uri()))
            .await
            .unwrap();
        assert_eq!(bytes.len(), 64);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_error() {
        let client = PinboardClient::new().unwrap();
        let result = client.fetch_page("http://127.0.0.1:1/").await;
        assert!(matches!(result, Err(PinboardError::HttpError(_))));
    }
}
