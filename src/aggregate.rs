//! Day-by-day aggregation of rover images
//!
//! Walks a window of calendar days ending today, asks an [`ImageClient`] for each
//! day's images in turn and collects them into an [`ImageCollection`]. The first
//! failing day aborts the whole run.

use chrono::{Days, Local, NaiveDate};

use crate::data::{ImageClient, ImageCollection, ImageError, ImageRequest, EARTH_DATE_FORMAT};

/// What to fetch: the query shared by every day in the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Maximum number of image URLs kept per day
    pub max_images: usize,
    /// Number of consecutive days to query, today included
    pub day_lookback: u32,
    /// Rover identifier, e.g. "curiosity"
    pub rover: String,
    /// Camera identifier, e.g. "NAVCAM"
    pub camera: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_images: 3,
            day_lookback: 10,
            rover: "curiosity".to_string(),
            camera: "NAVCAM".to_string(),
        }
    }
}

/// Fetches images for each of the last `config.day_lookback` days, ending today
///
/// "Today" is the local calendar date, read once before the first request.
pub async fn fetch_images<C>(
    client: &C,
    config: &FetchConfig,
) -> Result<ImageCollection, ImageError>
where
    C: ImageClient + ?Sized,
{
    let today = Local::now().date_naive();
    fetch_images_from(client, config, today).await
}

/// Same as [`fetch_images`], with the end of the window given explicitly
///
/// Requests are issued one at a time, newest day first. Returns the first error
/// encountered; no partial collection is produced. A window that reaches past
/// the earliest date chrono can represent is rejected before any request.
pub async fn fetch_images_from<C>(
    client: &C,
    config: &FetchConfig,
    today: NaiveDate,
) -> Result<ImageCollection, ImageError>
where
    C: ImageClient + ?Sized,
{
    let out_of_range = || ImageError::DateOutOfRange {
        today,
        days: config.day_lookback,
    };

    let oldest = config.day_lookback.saturating_sub(1);
    today
        .checked_sub_days(Days::new(u64::from(oldest)))
        .ok_or_else(out_of_range)?;

    let mut images_map = ImageCollection::new();

    for offset in 0..config.day_lookback {
        let date = today
            .checked_sub_days(Days::new(u64::from(offset)))
            .ok_or_else(out_of_range)?;

        let request =
            ImageRequest::for_date(&config.camera, &config.rover, date, config.max_images);
        let images = client.get_images(&request).await?;

        tracing::debug!(earth_date = %request.earth_date, count = images.len(), "collected images");
        images_map.insert(date.format(EARTH_DATE_FORMAT).to_string(), images);
    }

    tracing::info!(
        days = images_map.len(),
        images = images_map.values().map(Vec::len).sum::<usize>(),
        "aggregation complete"
    );

    Ok(images_map)
}
