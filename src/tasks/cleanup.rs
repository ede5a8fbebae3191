//! Expiry Sweep Task
//!
//! Background task that periodically purges expired cache entries.
//! Reads already ignore expired entries; the sweep only reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::EmployeeCache;

/// Spawns a background task that periodically purges expired cache entries.
///
/// # Arguments
/// * `cache` - Shared reference to the employee cache
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(cache: Arc<EmployeeCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    spawn_sweep(cache, Duration::from_secs(cleanup_interval_secs))
}

fn spawn_sweep(cache: Arc<EmployeeCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting expiry sweep with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;
            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;
    use crate::upstream::InMemoryUpstream;
    use uuid::Uuid;

    fn cache_with_ttl(ttl: Duration) -> Arc<EmployeeCache> {
        Arc::new(EmployeeCache::new(Arc::new(InMemoryUpstream::new()), ttl))
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let cache = cache_with_ttl(Duration::from_millis(50));
        cache.put(&Employee::new(Uuid::new_v4(), "John Doe")).await.unwrap();

        let handle = spawn_sweep(cache.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(250)).await;

        let stats = cache.stats().await;
        assert_eq!(stats.total_entries, 0, "Expired entry should have been purged");
        assert_eq!(stats.expired, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_preserves_valid_entries() {
        let cache = cache_with_ttl(Duration::from_secs(3600));
        let id = Uuid::new_v4();
        cache.put(&Employee::new(id, "John Doe")).await.unwrap();

        let handle = spawn_sweep(cache.clone(), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.len().await, 1, "Valid entry should not be removed");
        assert!(cache.get_by_id(id).await.is_ok());

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = cache_with_ttl(Duration::from_secs(91));

        let handle = spawn_cleanup_task(cache, 1);

        // Abort immediately
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
