//! NASA Mars Rover Photos API client
//!
//! This module provides the `ImageClient` capability and its HTTP-backed
//! implementation, which fetches photo listings for one rover, camera and earth
//! date and reduces them to a bounded list of image URLs.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use super::ImageRequest;
use crate::cache::ImageCache;

/// Base URL for the NASA open APIs
pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov";

/// Shared rate-limited key accepted by api.nasa.gov
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Default upper bound on a single request, connect through body read
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when fetching rover images
#[derive(Debug, Error)]
pub enum ImageError {
    /// Connection, TLS or timeout failure before a response arrived
    #[error("HTTP request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The API answered with something other than 200 OK
    #[error("bad response code: {}", .status.as_u16())]
    HttpStatus { status: StatusCode },

    /// The response body was cut short or could not be read
    #[error("Failed to read response body: {0}")]
    Read(#[source] reqwest::Error),

    /// The response body was not valid JSON
    #[error("Failed to parse JSON response: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The configured base URL cannot be used to build a request URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The lookback window reaches past the earliest representable date
    #[error("Cannot look back {days} days from {today}: date out of range")]
    DateOutOfRange { today: NaiveDate, days: u32 },
}

/// Something that can fetch the image URLs described by an [`ImageRequest`]
#[async_trait]
pub trait ImageClient: Send + Sync {
    /// Returns at most `request.max_images` URLs in the order the source lists them
    async fn get_images(&self, request: &ImageRequest) -> Result<Vec<String>, ImageError>;
}

/// Connection settings for [`MarsPhotosClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// api.nasa.gov key sent as the `api_key` query parameter
    pub api_key: String,
    /// Scheme and host (optionally a path prefix) the API path is appended to
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for the Mars Rover Photos API
///
/// Looks each request up in its cache first. On a miss it performs exactly one
/// GET, and the truncated result is written back to the cache.
#[derive(Clone)]
pub struct MarsPhotosClient {
    http_client: Client,
    config: ClientConfig,
    cache: Arc<dyn ImageCache>,
}

impl MarsPhotosClient {
    /// Creates a client whose HTTP requests are bounded by `config.timeout`
    pub fn new(config: ClientConfig, cache: Arc<dyn ImageCache>) -> Result<Self, ImageError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ImageError::Network)?;

        Ok(Self::with_client(http_client, config, cache))
    }

    /// Creates a client around an already configured HTTP client
    pub fn with_client(
        http_client: Client,
        config: ClientConfig,
        cache: Arc<dyn ImageCache>,
    ) -> Self {
        Self {
            http_client,
            config,
            cache,
        }
    }

    /// Builds `{base}/mars-photos/api/v1/rovers/{rover}/photos?camera=..&earth_date=..&api_key=..`
    ///
    /// The rover always stays a single path segment: `/`, `?` and `#` in it are
    /// percent-encoded rather than reshaping the path.
    pub fn request_url(&self, request: &ImageRequest) -> Result<Url, ImageError> {
        let mut url = Url::parse(&self.config.base_url)?;

        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend([
                "mars-photos",
                "api",
                "v1",
                "rovers",
                request.rover.as_str(),
                "photos",
            ]);

        url.query_pairs_mut()
            .append_pair("camera", &request.camera)
            .append_pair("earth_date", &request.earth_date)
            .append_pair("api_key", &self.config.api_key);

        Ok(url)
    }

    /// Performs the GET for a cache miss and parses the body
    async fn fetch_from_api(&self, request: &ImageRequest) -> Result<Vec<String>, ImageError> {
        let url = self.request_url(request)?;

        tracing::debug!(
            rover = %request.rover,
            camera = %request.camera,
            earth_date = %request.earth_date,
            "requesting photos"
        );

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(ImageError::Network)?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(
                status = status.as_u16(),
                earth_date = %request.earth_date,
                "photos API returned an error status"
            );
            return Err(ImageError::HttpStatus { status });
        }

        let body = response.bytes().await.map_err(ImageError::Read)?;
        let json: Value = serde_json::from_slice(&body)?;

        Ok(extract_image_urls(&json, request.max_images))
    }
}

impl fmt::Debug for MarsPhotosClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarsPhotosClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ImageClient for MarsPhotosClient {
    async fn get_images(&self, request: &ImageRequest) -> Result<Vec<String>, ImageError> {
        if let Some(cached) = self.cache.get(request) {
            tracing::debug!(earth_date = %request.earth_date, count = cached.len(), "cache hit");
            return Ok(cached);
        }

        let images = self.fetch_from_api(request).await?;
        self.cache.put(request.clone(), images.clone());

        Ok(images)
    }
}

/// Projects `photos[*].img_src` out of an API response, keeping the first `max_images`
///
/// A missing or non-array `photos` field yields an empty list, as do entries
/// whose `img_src` is absent or not a string.
pub fn extract_image_urls(response: &Value, max_images: usize) -> Vec<String> {
    let Some(photos) = response.get("photos").and_then(Value::as_array) else {
        return Vec::new();
    };

    photos
        .iter()
        .filter_map(|photo| photo.get("img_src").and_then(Value::as_str))
        .take(max_images)
        .map(str::to_owned)
        .collect()
}
