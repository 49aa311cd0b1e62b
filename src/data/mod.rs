//! Core data models for the Mars rover images CLI
//!
//! This module contains the request descriptor used to query the Mars Rover
//! Photos API (and to key the image cache), the per-day collection produced by
//! the aggregator, and the API client itself.

pub mod mars_photos;

pub use mars_photos::{ClientConfig, ImageClient, ImageError, MarsPhotosClient};

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Format of an earth date as sent to the API and used as a collection key
pub const EARTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Image URLs grouped by earth date (`YYYY-MM-DD`)
///
/// Each list keeps the order returned by the API. A `BTreeMap` keeps the
/// serialized output stable from run to run.
pub type ImageCollection = BTreeMap<String, Vec<String>>;

/// Describes a single photo query: one rover, one camera, one earth date
///
/// Used both as the argument to [`ImageClient::get_images`] and as the key of an
/// [`ImageCache`](crate::cache::ImageCache). No validation is done here; build
/// it with [`ImageRequest::for_date`] to get a well-formed date string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRequest {
    /// Camera identifier, e.g. "NAVCAM"
    pub camera: String,
    /// Rover identifier, e.g. "curiosity"
    pub rover: String,
    /// Earth date in `YYYY-MM-DD` form
    pub earth_date: String,
    /// Maximum number of image URLs to return
    pub max_images: usize,
}

impl ImageRequest {
    /// Creates a request from already-formatted parts
    pub fn new(
        camera: impl Into<String>,
        rover: impl Into<String>,
        earth_date: impl Into<String>,
        max_images: usize,
    ) -> Self {
        Self {
            camera: camera.into(),
            rover: rover.into(),
            earth_date: earth_date.into(),
            max_images,
        }
    }

    /// Creates a request for a calendar date, formatting it as `YYYY-MM-DD`
    pub fn for_date(
        camera: impl Into<String>,
        rover: impl Into<String>,
        date: NaiveDate,
        max_images: usize,
    ) -> Self {
        Self::new(
            camera,
            rover,
            date.format(EARTH_DATE_FORMAT).to_string(),
            max_images,
        )
    }
}
