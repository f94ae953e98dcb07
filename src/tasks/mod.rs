//! Background Tasks Module
//!
//! # Tasks
//! - Summary cache cleanup: purges expired summaries at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
