//! In-process upstream
//!
//! Holds employees in memory and counts every call it receives, so tests can
//! assert exactly when the cache reached for the source of truth.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{EmployeeUpstream, UpstreamResult};
use crate::error::UpstreamError;
use crate::models::{CreateEmployeeInput, Employee, ServerResponse};

/// Upstream backed by a local map.
#[derive(Debug, Default)]
pub struct InMemoryUpstream {
    employees: Mutex<HashMap<Uuid, Employee>>,
    fetch_all_calls: AtomicUsize,
    fetch_by_id_calls: AtomicUsize,
    create_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    refuse_deletes: AtomicBool,
    failing: AtomicBool,
}

impl InMemoryUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an upstream seeded with `employees`; records without id are kept under a fresh one.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let upstream = Self::new();
        for employee in employees {
            upstream.insert(employee);
        }
        upstream
    }

    /// Adds or replaces a record directly, bypassing call accounting.
    pub fn insert(&self, mut employee: Employee) -> Uuid {
        let id = *employee.id.get_or_insert_with(Uuid::new_v4);
        self.lock().insert(id, employee);
        id
    }

    /// Removes a record directly, bypassing call accounting.
    pub fn remove(&self, id: &Uuid) -> Option<Employee> {
        self.lock().remove(id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.lock().contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// When set, deletes answer `false` and leave the record in place.
    pub fn set_refuse_deletes(&self, refuse: bool) {
        self.refuse_deletes.store(refuse, Ordering::SeqCst);
    }

    /// When set, every call fails with a 503 status.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fetch_all_calls(&self) -> usize {
        self.fetch_all_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_by_id_calls(&self) -> usize {
        self.fetch_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Total calls across all four operations.
    pub fn total_calls(&self) -> usize {
        self.fetch_all_calls() + self.fetch_by_id_calls() + self.create_calls() + self.delete_calls()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Employee>> {
        self.employees
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<(), UpstreamError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status {
                status: 503,
                message: "upstream unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeUpstream for InMemoryUpstream {
    async fn fetch_all(&self) -> UpstreamResult<Vec<Employee>> {
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(ServerResponse::success(self.lock().values().cloned().collect()))
    }

    async fn fetch_by_id(&self, id: Uuid) -> UpstreamResult<Employee> {
        self.fetch_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.lock()
            .get(&id)
            .cloned()
            .map(ServerResponse::success)
            .ok_or_else(|| UpstreamError::NotFound(id.to_string()))
    }

    async fn create(&self, input: &CreateEmployeeInput) -> UpstreamResult<Employee> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let id = Uuid::new_v4();
        let email = format!("{}@company.com", input.name.to_lowercase().replace(' ', "."));
        let employee = Employee::new(id, input.name.clone())
            .with_salary(input.salary)
            .with_age(input.age)
            .with_title(input.title.clone())
            .with_email(email);
        self.lock().insert(id, employee.clone());
        Ok(ServerResponse::success(employee))
    }

    async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if self.refuse_deletes.load(Ordering::SeqCst) {
            return Ok(ServerResponse::success(false));
        }

        let mut employees = self.lock();
        let id = employees
            .iter()
            .find(|(_, employee)| employee.name.as_deref() == Some(name))
            .map(|(id, _)| *id);
        match id.and_then(|id| employees.remove(&id)) {
            Some(_) => Ok(ServerResponse::success(true)),
            None => Err(UpstreamError::NotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_by_id_not_found() {
        let upstream = InMemoryUpstream::new();
        let result = upstream.fetch_by_id(Uuid::new_v4()).await;

        assert!(matches!(result, Err(UpstreamError::NotFound(_))));
        assert_eq!(upstream.fetch_by_id_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_assigns_identifier() {
        let upstream = InMemoryUpstream::new();
        let input = CreateEmployeeInput {
            name: "Grace Hopper".to_string(),
            salary: 150000,
            age: 45,
            title: "Admiral".to_string(),
        };

        let created = upstream.create(&input).await.unwrap().into_data().unwrap();
        let id = created.id.unwrap();

        assert!(upstream.contains(&id));
        assert_eq!(created.email.as_deref(), Some("grace.hopper@company.com"));
        assert_eq!(upstream.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_name() {
        let id = Uuid::new_v4();
        let upstream = InMemoryUpstream::with_employees([Employee::new(id, "Jane Smith")]);

        let missing = upstream.delete_by_name("Nobody").await;
        assert!(matches!(missing, Err(UpstreamError::NotFound(ref name)) if name == "Nobody"));

        let deleted = upstream.delete_by_name("Jane Smith").await.unwrap();
        assert_eq!(deleted.data, Some(true));
        assert!(upstream.is_empty());
    }

    #[tokio::test]
    async fn test_refused_delete_keeps_record() {
        let id = Uuid::new_v4();
        let upstream = InMemoryUpstream::with_employees([Employee::new(id, "Jane Smith")]);
        upstream.set_refuse_deletes(true);

        let response = upstream.delete_by_name("Jane Smith").await.unwrap();
        assert_eq!(response.data, Some(false));
        assert!(upstream.contains(&id));
    }

    #[tokio::test]
    async fn test_failing_upstream() {
        let upstream = InMemoryUpstream::new();
        upstream.set_failing(true);

        let result = upstream.fetch_all().await;
        assert!(matches!(result, Err(UpstreamError::Status { status: 503, .. })));
        assert_eq!(upstream.total_calls(), 1);
    }
}
