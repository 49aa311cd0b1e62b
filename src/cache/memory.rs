//! In-process memoizing cache
//!
//! Holds image lists in a `HashMap` for the lifetime of the process. Useful when
//! the same request is issued more than once in a run.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::ImageCache;
use crate::data::ImageRequest;

/// Memoizing cache backed by a mutex-guarded map
///
/// Entries never expire and are never evicted.
#[derive(Debug, Default)]
pub struct MemoryImageCache {
    entries: Mutex<HashMap<ImageRequest, Vec<String>>>,
}

impl MemoryImageCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true if nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-written, so a
    // poisoned lock is still safe to use.
    fn entries(&self) -> MutexGuard<'_, HashMap<ImageRequest, Vec<String>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageCache for MemoryImageCache {
    fn get(&self, key: &ImageRequest) -> Option<Vec<String>> {
        self.entries().get(key).cloned()
    }

    fn put(&self, key: ImageRequest, value: Vec<String>) {
        self.entries().insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_for(date: &str) -> ImageRequest {
        ImageRequest::new("NAVCAM", "curiosity", date, 3)
    }

    fn urls(names: &[&str]) -> Vec<String> {
        names
            .iter()
            .map(|n| format!("https://mars.example/{}.jpg", n))
            .collect()
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = MemoryImageCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert!(cache.get(&request_for("2024-07-15")).is_none());
    }

    #[test]
    fn test_get_returns_what_was_put() {
        let cache = MemoryImageCache::new();
        cache.put(request_for("2024-07-15"), urls(&["a", "b"]));

        assert_eq!(cache.get(&request_for("2024-07-15")), Some(urls(&["a", "b"])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let cache = MemoryImageCache::new();
        cache.put(request_for("2024-07-15"), urls(&["first"]));
        cache.put(request_for("2024-07-15"), urls(&["second"]));

        assert_eq!(cache.get(&request_for("2024-07-15")), Some(urls(&["second"])));
        assert_eq!(cache.len(), 1, "Overwrite should not add an entry");
    }

    #[test]
    fn test_keys_differ_by_every_field() {
        let cache = MemoryImageCache::new();
        cache.put(request_for("2024-07-15"), urls(&["a"]));

        assert!(cache.get(&request_for("2024-07-14")).is_none());
        assert!(cache
            .get(&ImageRequest::new("FHAZ", "curiosity", "2024-07-15", 3))
            .is_none());
        assert!(cache
            .get(&ImageRequest::new("NAVCAM", "perseverance", "2024-07-15", 3))
            .is_none());
        assert!(cache
            .get(&ImageRequest::new("NAVCAM", "curiosity", "2024-07-15", 5))
            .is_none());
    }

    #[test]
    fn test_empty_list_is_a_hit() {
        let cache = MemoryImageCache::new();
        cache.put(request_for("2024-07-15"), Vec::new());

        assert_eq!(cache.get(&request_for("2024-07-15")), Some(Vec::new()));
    }
}
