//! Cache module for image lookups
//!
//! Defines the `ImageCache` capability consulted by the photos client before it
//! goes to the network, together with the two shipped implementations: a
//! pass-through cache that never stores anything and an in-process memoizing
//! cache. Neither persists across process runs.

mod memory;
mod noop;

pub use memory::MemoryImageCache;
pub use noop::NoopImageCache;

use crate::data::ImageRequest;

/// Storage for image URL lists keyed by the request that produced them
///
/// Implementations must return what was last `put` for an equal key until it
/// is overwritten. Ordering and eviction are left to the implementation.
pub trait ImageCache: Send + Sync {
    /// Looks up the images stored for `key`, returning `None` on a miss
    fn get(&self, key: &ImageRequest) -> Option<Vec<String>>;

    /// Stores `value` under `key`, replacing any previous entry
    fn put(&self, key: ImageRequest, value: Vec<String>);
}
