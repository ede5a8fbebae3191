//! HTTP Upstream Client
//!
//! reqwest-backed implementation of [`EmployeeUpstream`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::trace;
use uuid::Uuid;

use super::{EmployeeUpstream, UpstreamResult};
use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::{CreateEmployeeInput, DeleteEmployeeInput, Employee};

/// Client for the upstream employee REST API.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUpstream {
    /// Creates a client rooted at `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Creates a client from service configuration.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        Self::new(config.upstream_base_url.clone(), config.upstream_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn employee_url(&self, id: Uuid) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

/// Turns a non-success status into an error, otherwise decodes the envelope.
async fn decode<T: DeserializeOwned>(response: Response) -> UpstreamResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json().await?)
}

#[async_trait]
impl EmployeeUpstream for HttpUpstream {
    async fn fetch_all(&self) -> UpstreamResult<Vec<Employee>> {
        trace!("Getting all employees...");
        let response = self.client.get(&self.base_url).send().await?;
        decode(response).await
    }

    async fn fetch_by_id(&self, id: Uuid) -> UpstreamResult<Employee> {
        trace!("Getting employee with id {}...", id);
        let response = self.client.get(self.employee_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(id.to_string()));
        }
        decode(response).await
    }

    async fn create(&self, input: &CreateEmployeeInput) -> UpstreamResult<Employee> {
        trace!("Creating employee with name {}...", input.name);
        let response = self.client.post(&self.base_url).json(input).send().await?;
        decode(response).await
    }

    async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool> {
        trace!("Deleting employee with name {}...", name);
        let response = self
            .client
            .delete(&self.base_url)
            .json(&DeleteEmployeeInput::new(name))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(name.to_string()));
        }
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let upstream =
            HttpUpstream::new("http://localhost:8112/api/v1/employee/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(upstream.base_url(), "http://localhost:8112/api/v1/employee");
    }

    #[test]
    fn test_employee_url() {
        let upstream = HttpUpstream::from_config(&Config::default()).unwrap();
        let id = Uuid::nil();
        assert_eq!(
            upstream.employee_url(id),
            "http://localhost:8112/api/v1/employee/00000000-0000-0000-0000-000000000000"
        );
    }
}
