//! Summary Cache Store
//!
//! Maps product ids to generated summaries with a fixed TTL and LRU eviction.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Summary Cache ==
/// Time- and size-bounded cache of review summaries, keyed by product id.
///
/// Holds at most one entry per product. Entries are never served after their
/// TTL. Inserting a new product into a full cache first reclaims expired
/// entries, and evicts the least recently used entry only when none expired.
#[derive(Debug)]
pub struct SummaryCache {
    /// Product id -> cached summary
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of cached summaries
    max_entries: usize,
    /// Lifetime of every entry
    ttl: Duration,
}

impl SummaryCache {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `max_entries` - Capacity, clamped to at least one entry
    /// * `ttl` - How long a summary stays valid after insertion
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    // == Get ==
    /// Returns the cached summary for a product, if present and not expired.
    ///
    /// An expired entry is dropped on the spot and counted as a miss.
    pub fn get(&mut self, product_id: &str) -> Option<String> {
        let expired = match self.entries.get(product_id) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove(product_id);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(product_id);
        self.entries.get(product_id).map(|entry| entry.summary.clone())
    }

    // == Put ==
    /// Stores a summary, overwriting any previous one and resetting its expiry.
    pub fn put(&mut self, product_id: impl Into<String>, summary: impl Into<String>) {
        let product_id = product_id.into();

        if !self.entries.contains_key(&product_id) && self.entries.len() >= self.max_entries {
            // Prefer reclaiming expired space over evicting a live summary
            if self.cleanup_expired() == 0 {
                if let Some(evicted) = self.lru.evict_oldest() {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
            }
        }

        self.entries
            .insert(product_id.clone(), CacheEntry::new(summary.into(), self.ttl));
        self.lru.touch(&product_id);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    fn remove(&mut self, product_id: &str) {
        self.entries.remove(product_id);
        self.lru.remove(product_id);
        self.stats.set_total_entries(self.entries.len());
    }

    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    #[cfg(test)]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
