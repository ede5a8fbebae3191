//! Employee record
//!
//! The cached domain entity. The cache treats it as an immutable value and
//! only ever replaces a whole record under its identifier.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An employee profile as served by the upstream record service.
///
/// Field names follow the upstream wire format (`employee_name`, ...); the
/// plain names are accepted as aliases when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Upstream-assigned identifier, may be missing in malformed payloads
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(rename = "employee_name", alias = "name", default)]
    pub name: Option<String>,
    #[serde(rename = "employee_salary", alias = "salary", default)]
    pub salary: Option<u32>,
    #[serde(rename = "employee_age", alias = "age", default)]
    pub age: Option<u32>,
    #[serde(rename = "employee_title", alias = "title", default)]
    pub title: Option<String>,
    #[serde(rename = "employee_email", alias = "email", default)]
    pub email: Option<String>,
}

impl Employee {
    /// Creates a record with an identifier and name, other attributes unset.
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            salary: None,
            age: None,
            title: None,
            email: None,
        }
    }

    pub fn with_salary(mut self, salary: u32) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the name if it is present and non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
