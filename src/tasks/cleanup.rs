//! Summary Cache Cleanup Task
//!
//! Background task that periodically drops expired summaries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SummaryCache;

/// Spawns a background task that purges expired summaries every `interval`.
///
/// Expired entries are never served even without this task; it only keeps
/// memory from holding summaries nobody asks for again.
///
/// Returns the task handle so it can be aborted during graceful shutdown.
pub fn spawn_cleanup_task(cache: Arc<RwLock<SummaryCache>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "Starting summary cache cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("Summary cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Summary cache cleanup: no expired entries found");
            }
        }
    })
}
