//! Pass-through cache that never stores anything

use super::ImageCache;
use crate::data::ImageRequest;

/// Cache that always misses
///
/// Keeps caching structurally pluggable without committing to a policy: every
/// lookup goes to the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopImageCache;

impl ImageCache for NoopImageCache {
    fn get(&self, _key: &ImageRequest) -> Option<Vec<String>> {
        None
    }

    fn put(&self, _key: ImageRequest, _value: Vec<String>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ImageRequest {
        ImageRequest::new("NAVCAM", "curiosity", "2024-07-15", 3)
    }

    #[test]
    fn test_get_always_misses() {
        let cache = NoopImageCache;
        assert!(cache.get(&request()).is_none());
    }

    #[test]
    fn test_put_is_not_observable() {
        let cache = NoopImageCache;
        cache.put(request(), vec!["https://example.com/a.jpg".to_string()]);

        assert!(
            cache.get(&request()).is_none(),
            "Noop cache should still miss after a put"
        );
    }
}
