//! Request and Response models for the employee cache
//!
//! This module defines the employee record and the DTOs (Data Transfer Objects)
//! exchanged with both the upstream service and our own HTTP clients.

pub mod employee;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use employee::Employee;
pub use requests::{CreateEmployeeInput, DeleteEmployeeInput};
pub use responses::{ErrorResponse, HealthResponse, ServerResponse, StatsResponse};
