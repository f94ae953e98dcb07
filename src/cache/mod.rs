//! Cache Module
//!
//! In-memory summary cache with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::SummaryCache;

// == Public Constants ==
/// Default lifetime of a cached summary, in seconds
pub const DEFAULT_SUMMARY_TTL_SECS: u64 = 3600;

/// Default number of products whose summary is kept
pub const DEFAULT_MAX_SUMMARIES: usize = 100;
