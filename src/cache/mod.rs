//! Cache Module
//!
//! Provides the TTL-bound employee store and the read-through cache built on it.

mod employee_cache;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use employee_cache::EmployeeCache;
pub use entry::CacheEntry;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::RecordStore;
