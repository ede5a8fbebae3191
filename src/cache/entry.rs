//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::models::Employee;

// == Cache Entry ==
/// A cached employee together with the moment it was written.
///
/// Entries are replaced whole; an employee is never edited in place.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored record
    pub employee: Employee,
    /// Monotonic write timestamp
    pub written_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(employee: Employee) -> Self {
        Self {
            employee,
            written_at: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry is expired once the elapsed time reaches
    /// the TTL, so it is visible for strictly less than `ttl` after its write.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.written_at.elapsed() >= ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use uuid::Uuid;

    fn employee() -> Employee {
        Employee::new(Uuid::new_v4(), "John Doe")
    }

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(employee());

        assert_eq!(entry.employee.name.as_deref(), Some("John Doe"));
        assert!(!entry.is_expired(Duration::from_secs(91)));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(employee());
        let ttl = Duration::from_millis(50);

        assert!(!entry.is_expired(ttl));

        // Wait for expiration
        sleep(Duration::from_millis(80));

        assert!(entry.is_expired(ttl));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(employee());

        // A zero TTL expires at the moment of writing
        assert!(entry.is_expired(Duration::ZERO), "Entry should be expired at boundary");
    }
}
