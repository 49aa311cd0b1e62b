//! Command-line interface parsing for the Mars rover images CLI
//!
//! This module handles parsing of CLI arguments using clap. Every setting can
//! also come from the environment, which is how the API key is meant to be
//! supplied.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use url::Url;

use crate::aggregate::FetchConfig;
use crate::data::mars_photos::{DEFAULT_BASE_URL, DEMO_API_KEY};
use crate::data::ClientConfig;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The API base URL is not an absolute http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an absolute http or https URL")]
    InvalidBaseUrl(String),

    /// A zero timeout would fail every request
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,
}

/// Mars rover images - collect recent rover photo URLs per day
#[derive(Parser, Debug)]
#[command(name = "marsimages")]
#[command(about = "Collect recent Mars rover photo URLs, grouped by earth date, as JSON")]
#[command(version)]
pub struct Cli {
    /// Maximum number of image URLs kept per day
    #[arg(long, env = "MARS_MAX_IMAGES", default_value_t = 3)]
    pub max_images: usize,

    /// Number of days to look back, today included
    #[arg(long = "days", env = "MARS_DAY_LOOKBACK", default_value_t = 10)]
    pub day_lookback: u32,

    /// Rover to query (curiosity, opportunity, spirit, perseverance)
    #[arg(long, env = "MARS_ROVER", default_value = "curiosity")]
    pub rover: String,

    /// Camera to query, e.g. NAVCAM, FHAZ, RHAZ, MAST
    #[arg(long, env = "MARS_CAMERA", default_value = "NAVCAM")]
    pub camera: String,

    /// api.nasa.gov key
    #[arg(long, env = "NASA_API_KEY", default_value = DEMO_API_KEY, hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the API
    #[arg(long, env = "MARS_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        env = "MARS_HTTP_TIMEOUT",
        default_value_t = 30
    )]
    pub timeout_secs: u64,

    /// Remember responses in memory for the duration of the run
    #[arg(long)]
    pub memory_cache: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// What to fetch
    pub fetch: FetchConfig,
    /// How to reach the API
    pub client: ClientConfig,
    /// Whether to use the in-memory cache instead of the pass-through one
    pub memory_cache: bool,
    /// Whether to pretty-print the output
    pub pretty: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if the base URL or timeout is unusable
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        validate_base_url(&cli.base_url)?;

        if cli.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout);
        }

        Ok(StartupConfig {
            fetch: FetchConfig {
                max_images: cli.max_images,
                day_lookback: cli.day_lookback,
                rover: cli.rover.clone(),
                camera: cli.camera.clone(),
            },
            client: ClientConfig {
                api_key: cli.api_key.clone(),
                base_url: cli.base_url.clone(),
                timeout: Duration::from_secs(cli.timeout_secs),
            },
            memory_cache: cli.memory_cache,
            pretty: cli.pretty,
        })
    }
}

fn validate_base_url(base_url: &str) -> Result<(), CliError> {
    let invalid = || CliError::InvalidBaseUrl(base_url.to_string());

    let url = Url::parse(base_url).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() => Ok(()),
        _ => Err(invalid()),
    }
}
