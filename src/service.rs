//! Employee Service
//!
//! Sequences creates and deletes between the upstream service and the cache.
//! The cache is only touched after upstream confirmed the mutation.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::cache::EmployeeCache;
use crate::error::{DeleteFailure, Result, ServiceError, UpstreamError};
use crate::models::{CreateEmployeeInput, Employee};
use crate::upstream::EmployeeUpstream;

/// Business layer in front of the cache and the upstream client.
#[derive(Clone)]
pub struct EmployeeService {
    cache: Arc<EmployeeCache>,
    upstream: Arc<dyn EmployeeUpstream>,
}

impl EmployeeService {
    pub fn new(cache: Arc<EmployeeCache>, upstream: Arc<dyn EmployeeUpstream>) -> Self {
        Self { cache, upstream }
    }

    pub fn cache(&self) -> &Arc<EmployeeCache> {
        &self.cache
    }

    /// Returns all employees; missing upstream data reads as an empty list.
    pub async fn get_all(&self) -> Result<Vec<Employee>> {
        let response = self.cache.get_all().await?;
        Ok(response.into_data().unwrap_or_default())
    }

    /// Returns the employee with `id`.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Employee> {
        self.cache
            .get_by_id(id)
            .await?
            .into_data()
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Creates an employee upstream and caches the confirmed record.
    ///
    /// Every failure is reported as [`ServiceError::CreationFailed`].
    pub async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee> {
        let response = self.upstream.create(input).await.map_err(|err| {
            error!("Error creating employee: {}", err);
            ServiceError::CreationFailed(err.to_string())
        })?;

        let employee = response.into_data().ok_or_else(|| {
            error!("Failed to create employee: null response from upstream");
            ServiceError::CreationFailed("null response from upstream".to_string())
        })?;

        self.cache
            .put(&employee)
            .await
            .map_err(|err| ServiceError::CreationFailed(err.to_string()))?;

        info!("Created employee with id {:?}", employee.id);
        Ok(employee)
    }

    /// Deletes the employee with `id`, returning its name.
    ///
    /// Upstream deletes by name, so the record is resolved first. Any failure
    /// along the way surfaces as [`ServiceError::DeleteFailed`], whose message
    /// is always "Failed to delete employee."; the [`DeleteFailure`] tag says why.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<String> {
        match self.try_delete(id).await {
            Ok(name) => {
                info!("Deleted employee {} with id {}", name, id);
                Ok(name)
            }
            Err(failure) => {
                warn!("Failed to delete employee with id {}: {:?}", id, failure);
                Err(ServiceError::DeleteFailed(failure))
            }
        }
    }

    async fn try_delete(&self, id: Uuid) -> std::result::Result<String, DeleteFailure> {
        let employee = self
            .cache
            .get_by_id(id)
            .await
            .map_err(|err| match err {
                UpstreamError::NotFound(_) => DeleteFailure::NotFound,
                other => DeleteFailure::Upstream(other.to_string()),
            })?
            .into_data()
            .ok_or(DeleteFailure::NotFound)?;

        let name = employee
            .display_name()
            .ok_or(DeleteFailure::MissingName)?
            .to_string();

        let confirmed = self
            .upstream
            .delete_by_name(&name)
            .await
            .map_err(|err| match err {
                UpstreamError::NotFound(_) => DeleteFailure::NotFound,
                other => DeleteFailure::Upstream(other.to_string()),
            })?
            .into_data()
            .unwrap_or(false);

        if !confirmed {
            return Err(DeleteFailure::Refused);
        }

        self.cache.evict(id).await;
        Ok(name)
    }
}
