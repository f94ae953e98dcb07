//! Review Digest - product reviews with cached AI summaries
//!
//! Stores product reviews and answers listings with an average rating and a
//! summary generated by an external text-generation service, cached per
//! product with TTL expiration and LRU eviction.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod summarizer;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::ReviewService;
pub use tasks::spawn_cleanup_task;
