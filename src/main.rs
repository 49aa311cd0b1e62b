//! Mars rover images - collect recent rover photo URLs per day
//!
//! Queries the NASA Mars Rover Photos API once per day over a lookback window
//! and prints the image URLs, grouped by earth date, as one JSON object.
//!
//! Exit status is 1 when fetching fails (or the arguments are unusable) and 2
//! when the result cannot be written out.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use marsimages::aggregate::fetch_images;
use marsimages::cache::{ImageCache, MemoryImageCache, NoopImageCache};
use marsimages::cli::{Cli, StartupConfig};
use marsimages::data::MarsPhotosClient;
use marsimages::output::write_collection;

const EXIT_FETCH_FAILED: u8 = 1;
const EXIT_OUTPUT_FAILED: u8 = 2;

/// Sends logs to stderr so stdout only ever carries the JSON result
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            return ExitCode::from(EXIT_FETCH_FAILED);
        }
    };

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error encountered: {}", e);
            return ExitCode::from(EXIT_FETCH_FAILED);
        }
    };

    let cache: Arc<dyn ImageCache> = if config.memory_cache {
        Arc::new(MemoryImageCache::new())
    } else {
        Arc::new(NoopImageCache)
    };

    tracing::info!(
        rover = %config.fetch.rover,
        camera = %config.fetch.camera,
        days = config.fetch.day_lookback,
        max_images = config.fetch.max_images,
        "fetching rover images"
    );

    let collection = match MarsPhotosClient::new(config.client, cache) {
        Ok(client) => fetch_images(&client, &config.fetch).await,
        Err(e) => Err(e),
    };

    let collection = match collection {
        Ok(collection) => collection,
        Err(e) => {
            eprintln!("error encountered: {}", e);
            return ExitCode::from(EXIT_FETCH_FAILED);
        }
    };

    if let Err(e) = write_collection(io::stdout().lock(), &collection, config.pretty) {
        eprintln!("error encountered: {}", e);
        return ExitCode::from(EXIT_OUTPUT_FAILED);
    }

    ExitCode::SUCCESS
}
