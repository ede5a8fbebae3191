//! Employee Cache - A read-through/write-through cache for employee records
//!
//! Serves employee reads from a TTL-bound in-memory store, falls back to the
//! upstream record service on miss, and keeps the store consistent with
//! creates and deletes issued through the same service.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use cache::EmployeeCache;
pub use config::Config;
pub use service::EmployeeService;
pub use tasks::spawn_cleanup_task;
