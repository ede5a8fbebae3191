//! Record Store Module
//!
//! Identifier-keyed employee storage with passive TTL expiration.
//! The store does no locking of its own; [`EmployeeCache`](super::EmployeeCache)
//! wraps it in a read/write lock.

use std::collections::HashMap;
use std::time::Duration;

use uuid::Uuid;

use crate::cache::CacheEntry;
use crate::models::Employee;

// == Record Store ==
/// Mapping from employee identifier to its cache entry.
///
/// Expired entries are invisible to every read even before they are purged.
///
/// Evictions that happen while an upstream fetch is in flight are remembered
/// with a generation number, so [`RecordStore::fill`] can refuse records that
/// were fetched before they were deleted.
#[derive(Debug)]
pub struct RecordStore {
    /// At most one entry per identifier
    entries: HashMap<Uuid, CacheEntry>,
    /// Validity window measured from each entry's last write
    ttl: Duration,
    /// Bumped on every remembered eviction
    generation: u64,
    /// Identifier to the generation it was evicted at
    evicted: HashMap<Uuid, u64>,
}

impl RecordStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            generation: 0,
            evicted: HashMap::new(),
        }
    }

    /// Current eviction generation; a fill records it before going upstream.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Insert ==
    /// Inserts or replaces the entry for `id`, restarting its TTL.
    ///
    /// Returns true if a previous entry was replaced.
    pub fn insert(&mut self, id: Uuid, employee: Employee) -> bool {
        self.entries.insert(id, CacheEntry::new(employee)).is_some()
    }

    // == Get ==
    /// Returns the record for `id` if present and not expired.
    pub fn get(&self, id: &Uuid) -> Option<Employee> {
        self.entries
            .get(id)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.employee.clone())
    }

    // == Valid Values ==
    /// Returns every record that has not expired, in no particular order.
    pub fn valid_values(&self) -> Vec<Employee> {
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.employee.clone())
            .collect()
    }

    /// Number of entries that have not expired.
    pub fn valid_len(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(self.ttl))
            .count()
    }

    // == Fill ==
    /// Inserts a record fetched by a fill that started at `started_at`.
    ///
    /// Refuses the record when `id` was evicted after the fill started, and
    /// returns whether it was stored.
    pub fn fill(&mut self, id: Uuid, employee: Employee, started_at: u64) -> bool {
        if self.evicted.get(&id).is_some_and(|evicted_at| *evicted_at > started_at) {
            return false;
        }
        self.insert(id, employee);
        true
    }

    /// Remembers that `id` was evicted, for fills already in flight.
    pub fn remember_eviction(&mut self, id: Uuid) {
        self.generation += 1;
        self.evicted.insert(id, self.generation);
    }

    /// Forgets remembered evictions once no fill can still observe them.
    pub fn forget_evictions(&mut self) {
        self.evicted.clear();
    }

    // == Remove ==
    /// Removes the entry for `id`, returning true if one was held.
    pub fn remove(&mut self, id: &Uuid) -> bool {
        self.entries.remove(id).is_some()
    }

    // == Cleanup Expired ==
    /// Physically drops every expired entry.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| !entry.is_expired(ttl));
        before - self.entries.len()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Length ==
    /// Returns the number of entries held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entry is held at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
