//! Request DTOs for the employee API
//!
//! Defines the bodies accepted from our clients and forwarded upstream.

use serde::{Deserialize, Serialize};

/// Lowest age the upstream service accepts for a new employee.
pub const MIN_EMPLOYEE_AGE: u32 = 16;

/// Highest age the upstream service accepts for a new employee.
pub const MAX_EMPLOYEE_AGE: u32 = 75;

/// Request body for creating an employee (POST /api/v1/employees)
///
/// Forwarded verbatim to the upstream create endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: String,
    pub salary: u32,
    pub age: u32,
    pub title: String,
}

impl CreateEmployeeInput {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be blank".to_string());
        }
        if self.salary == 0 {
            return Some("Salary must be greater than zero".to_string());
        }
        if !(MIN_EMPLOYEE_AGE..=MAX_EMPLOYEE_AGE).contains(&self.age) {
            return Some(format!(
                "Age must be between {} and {}",
                MIN_EMPLOYEE_AGE, MAX_EMPLOYEE_AGE
            ));
        }
        if self.title.trim().is_empty() {
            return Some("Title cannot be blank".to_string());
        }
        None
    }
}

/// Body of the upstream delete call, which identifies records by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEmployeeInput {
    pub name: String,
}

impl DeleteEmployeeInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
