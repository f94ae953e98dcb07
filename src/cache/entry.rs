//! Cache Entry Module
//!
//! Defines a cached summary together with its expiry deadline.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A summary cached for one product.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached summary text
    pub summary: String,
    /// When the summary was stored
    pub inserted_at: Instant,
    /// When the summary stops being served
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry that lives for `ttl` from now.
    pub fn new(summary: String, ttl: Duration) -> Self {
        let now = Instant::now();

        Self {
            summary,
            inserted_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches `expires_at`, so a
    /// summary is never served after its full TTL has elapsed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against an explicit instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Time elapsed since the summary was stored.
    #[cfg(test)]
    pub fn age(&self) -> Duration {
        self.inserted_at.elapsed()
    }
}
