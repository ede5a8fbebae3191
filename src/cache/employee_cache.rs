//! Employee Cache Module
//!
//! Cache-aside layer over the upstream record service. Reads prefer the
//! store and populate it on miss; creates and deletes confirmed upstream are
//! mirrored through [`EmployeeCache::put`] and [`EmployeeCache::evict`].
//!
//! The store sits behind a `tokio::sync::RwLock`. Reads take the shared lock
//! so they never block each other, writes take the exclusive lock, and no
//! lock is ever held across an upstream call.
//!
//! Two callers can observe an empty store at the same time in
//! [`EmployeeCache::get_all`], both fetch upstream and both populate. Population
//! only replaces whole entries under their identifier, so the duplicate work
//! leaves the store in the same state as a single fetch would.
//!
//! A fetch can also overlap a confirmed delete: upstream answers with the
//! record, the delete evicts it, and only then does the fetch populate. Every
//! fetch notes the store's eviction generation before going upstream, and
//! [`EmployeeCache::evict`] remembers evictions made while fetches are in
//! flight, so such a fetch skips the deleted record instead of reviving it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::{CacheStats, RecordStore, StatsSnapshot};
use crate::config::Config;
use crate::error::{ServiceError, UpstreamError};
use crate::models::{Employee, ServerResponse};
use crate::upstream::EmployeeUpstream;

// == Employee Cache ==
/// Shared read-through cache of employee records.
pub struct EmployeeCache {
    store: RwLock<RecordStore>,
    upstream: Arc<dyn EmployeeUpstream>,
    stats: CacheStats,
    fills_in_flight: AtomicUsize,
}

/// An upstream fetch that will populate the store.
///
/// Counts itself in flight until dropped, including when the fetch fails or
/// the caller is cancelled.
struct Fill<'a> {
    in_flight: &'a AtomicUsize,
    started_at: u64,
}

impl<'a> Fill<'a> {
    fn start(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            in_flight,
            started_at: 0,
        }
    }
}

impl Drop for Fill<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl EmployeeCache {
    // == Constructor ==
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(upstream: Arc<dyn EmployeeUpstream>, ttl: Duration) -> Self {
        info!("Initializing employee cache with {}s expiration", ttl.as_secs_f64());
        Self {
            store: RwLock::new(RecordStore::new(ttl)),
            upstream,
            stats: CacheStats::new(),
            fills_in_flight: AtomicUsize::new(0),
        }
    }

    /// Creates a cache using the configured TTL.
    pub fn from_config(upstream: Arc<dyn EmployeeUpstream>, config: &Config) -> Self {
        Self::new(upstream, config.cache_ttl())
    }

    /// Registers a fill and records the eviction generation it starts from.
    async fn begin_fill(&self) -> Fill<'_> {
        let mut fill = Fill::start(&self.fills_in_flight);
        fill.started_at = self.store.read().await.generation();
        fill
    }

    /// Stores the records fetched by `fill`, skipping any evicted meanwhile.
    ///
    /// Returns how many records were stored.
    async fn populate<'e>(
        &self,
        fill: Fill<'_>,
        records: impl IntoIterator<Item = (Uuid, &'e Employee)>,
    ) -> usize {
        let mut store = self.store.write().await;
        let mut stored = 0;
        for (id, employee) in records {
            if store.fill(id, employee.clone(), fill.started_at) {
                stored += 1;
            } else {
                debug!("Employee with id {} was evicted during the fetch, not caching", id);
            }
        }
        drop(fill);
        if self.fills_in_flight.load(Ordering::SeqCst) == 0 {
            store.forget_evictions();
        }
        stored
    }

    // == Get All ==
    /// Returns every employee.
    ///
    /// Answers from memory while at least one unexpired entry exists.
    /// Otherwise fetches upstream, caches every returned record that carries
    /// an identifier, and hands back the upstream envelope untouched.
    pub async fn get_all(&self) -> Result<ServerResponse<Vec<Employee>>, UpstreamError> {
        let cached = self.store.read().await.valid_values();
        if !cached.is_empty() {
            self.stats.record_hit();
            debug!("Cache hit: returning {} employees from cache", cached.len());
            return Ok(ServerResponse::success(cached));
        }

        self.stats.record_miss();
        debug!("Cache miss: fetching all employees from upstream");
        let fill = self.begin_fill().await;
        let response = self.upstream.fetch_all().await?;

        if let Some(employees) = response.data.as_ref() {
            let records = employees
                .iter()
                .filter_map(|employee| employee.id.map(|id| (id, employee)));
            let cached = self.populate(fill, records).await;
            debug!("Cached {} of {} fetched employees", cached, employees.len());
        }

        Ok(response)
    }

    // == Get By Id ==
    /// Returns the employee with `id`.
    ///
    /// Upstream `NotFound` is passed through and nothing is cached for it.
    pub async fn get_by_id(&self, id: Uuid) -> Result<ServerResponse<Employee>, UpstreamError> {
        let cached = self.store.read().await.get(&id);
        if let Some(employee) = cached {
            self.stats.record_hit();
            debug!("Cache hit: found employee with id {}", id);
            return Ok(ServerResponse::success(employee));
        }

        self.stats.record_miss();
        debug!("Cache miss: fetching employee with id {} from upstream", id);
        let fill = self.begin_fill().await;
        let response = self.upstream.fetch_by_id(id).await?;

        if let Some(employee) = response.data.as_ref() {
            debug!("Caching employee with id {}", id);
            self.populate(fill, [(id, employee)]).await;
        }

        Ok(response)
    }

    // == Put ==
    /// Inserts or replaces `employee` under its identifier, restarting its TTL.
    ///
    /// Only call after upstream confirmed the record exists. A record without
    /// identifier is rejected with [`ServiceError::MissingIdentifier`].
    pub async fn put(&self, employee: &Employee) -> Result<(), ServiceError> {
        let id = employee.id.ok_or(ServiceError::MissingIdentifier)?;
        debug!("Adding/updating employee with id {} in cache", id);
        self.store.write().await.insert(id, employee.clone());
        Ok(())
    }

    // == Evict ==
    /// Removes the entry for `id`; absent entries are ignored.
    ///
    /// Only call after upstream confirmed the deletion.
    pub async fn evict(&self, id: Uuid) {
        let mut store = self.store.write().await;
        let removed = store.remove(&id);
        if self.fills_in_flight.load(Ordering::SeqCst) > 0 {
            store.remember_eviction(id);
        } else {
            store.forget_evictions();
        }
        drop(store);

        if removed {
            self.stats.record_eviction();
            debug!("Removed employee with id {} from cache", id);
        } else {
            debug!("Employee with id {} was not cached", id);
        }
    }

    // == Purge Expired ==
    /// Physically drops expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let removed = self.store.write().await.cleanup_expired();
        self.stats.record_expired(removed);
        removed
    }

    /// Drops every entry, e.g. on shutdown.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    /// Number of unexpired entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.valid_len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    // == Stats ==
    pub async fn stats(&self) -> StatsSnapshot {
        let total_entries = self.store.read().await.len();
        self.stats.snapshot(total_entries)
    }
}
