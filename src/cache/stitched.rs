//! Stitched clip cache with LRU eviction.
//!
//! Remembers stitched buffers by the cache key of their [`TimestampParts`],
//! so repeating an identical request skips fetching and stitching.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::types::{PcmBuffer, TimestampParts};

/// Default number of clips to keep in cache.
pub const DEFAULT_MAX_ENTRIES: usize = 8;

/// Stitched clip cache with LRU eviction policy.
pub struct StitchCache {
    /// Clips indexed by cache key.
    entries: HashMap<String, CacheEntry>,
    /// Maximum number of entries to keep.
    max_entries: usize,
}

/// A cached clip with its parts and access timestamp.
struct CacheEntry {
    parts: TimestampParts,
    buffer: Arc<PcmBuffer>,
    last_accessed: Instant,
}

impl StitchCache {
    /// Creates a new cache with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Creates a new cache with specified capacity (at least one entry).
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Returns the clip for `parts`, updating its access time.
    ///
    /// An entry whose stored parts differ from `parts` is treated as a miss.
    pub fn get(&mut self, parts: &TimestampParts) -> Option<Arc<PcmBuffer>> {
        let entry = self.entries.get_mut(&parts.cache_key())?;
        if entry.parts != *parts {
            return None;
        }
        entry.last_accessed = Instant::now();
        Some(Arc::clone(&entry.buffer))
    }

    /// Inserts a clip into the cache.
    ///
    /// If the cache is full, the least recently used entry is evicted first.
    pub fn put(&mut self, parts: TimestampParts, buffer: Arc<PcmBuffer>) {
        let key = parts.cache_key();

        // Evict if at capacity and this is a new entry
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.evict_lru();
        }

        self.entries.insert(
            key,
            CacheEntry {
                parts,
                buffer,
                last_accessed: Instant::now(),
            },
        );
    }

    /// Checks if a clip for `parts` exists in the cache.
    #[cfg(test)]
    pub(crate) fn contains(&self, parts: &TimestampParts) -> bool {
        self.entries
            .get(&parts.cache_key())
            .is_some_and(|entry| entry.parts == *parts)
    }

    /// Returns the number of clips in the cache.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evicts the least recently used entry.
    ///
    /// Returns the parts of the evicted clip if any.
    pub fn evict_lru(&mut self) -> Option<TimestampParts> {
        let oldest_key = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_accessed)
            .map(|(k, _)| k.clone())?;

        self.entries.remove(&oldest_key).map(|entry| entry.parts)
    }
}

impl Default for StitchCache {
    fn default() -> Self {
        Self::new()
    }
}
