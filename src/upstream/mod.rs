//! Upstream Module
//!
//! The contract the cache needs from the upstream employee record service,
//! plus its HTTP and in-process implementations.

mod http;
mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UpstreamError;
use crate::models::{CreateEmployeeInput, Employee, ServerResponse};

pub use http::HttpUpstream;
pub use memory::InMemoryUpstream;

/// Convenience Result type for upstream calls.
pub type UpstreamResult<T> = std::result::Result<ServerResponse<T>, UpstreamError>;

/// Operations the cache consumes from the upstream record service.
///
/// Timeouts and retries are the implementor's business; callers treat each
/// call as a single attempt.
#[async_trait]
pub trait EmployeeUpstream: Send + Sync {
    /// Fetches every employee. No ordering is guaranteed.
    async fn fetch_all(&self) -> UpstreamResult<Vec<Employee>>;

    /// Fetches one employee, failing with `UpstreamError::NotFound` when absent.
    async fn fetch_by_id(&self, id: Uuid) -> UpstreamResult<Employee>;

    /// Creates an employee, returning it with its assigned identifier.
    async fn create(&self, input: &CreateEmployeeInput) -> UpstreamResult<Employee>;

    /// Deletes the employee with the given name; `Some(true)` confirms deletion.
    async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool>;
}
