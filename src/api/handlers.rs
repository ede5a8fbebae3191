//! API Handlers
//!
//! HTTP request handlers for each employee endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::EmployeeCache;
use crate::config::Config;
use crate::error::{Result, ServiceError, UpstreamError};
use crate::models::{CreateEmployeeInput, Employee, HealthResponse, StatsResponse};
use crate::service::EmployeeService;
use crate::upstream::{EmployeeUpstream, HttpUpstream};

/// Application state shared across all handlers.
///
/// Holds the single process-wide cache behind the service layer.
#[derive(Clone)]
pub struct AppState {
    pub service: EmployeeService,
}

impl AppState {
    /// Creates a new AppState with the given service.
    pub fn new(service: EmployeeService) -> Self {
        Self { service }
    }

    /// Builds a cache and service around an existing upstream.
    pub fn with_upstream(upstream: Arc<dyn EmployeeUpstream>, config: &Config) -> Self {
        let cache = Arc::new(EmployeeCache::from_config(upstream.clone(), config));
        Self::new(EmployeeService::new(cache, upstream))
    }

    /// Creates a new AppState from configuration, talking to upstream over HTTP.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let upstream = Arc::new(HttpUpstream::from_config(config)?);
        Ok(Self::with_upstream(upstream, config))
    }

    pub fn cache(&self) -> &Arc<EmployeeCache> {
        self.service.cache()
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::InvalidId(raw.to_string()))
}

/// Handler for GET /api/v1/employees
pub async fn get_all_handler(State(state): State<AppState>) -> Result<Json<Vec<Employee>>> {
    debug!("Getting all employees");
    let employees = state.service.get_all().await?;
    Ok(Json(employees))
}

/// Handler for GET /api/v1/employees/:id
pub async fn get_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>> {
    debug!("Getting employee by id: {}", id);
    let id = parse_id(&id)?;
    let employee = state.service.get_by_id(id).await?;
    Ok(Json(employee))
}

/// Handler for POST /api/v1/employees
///
/// Bodies that fail to decode are reported like any other invalid request.
pub async fn create_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateEmployeeInput>, JsonRejection>,
) -> Result<Json<Employee>> {
    let Json(input) =
        payload.map_err(|rejection| ServiceError::InvalidRequest(rejection.body_text()))?;
    info!("Creating employee with name: {}", input.name);

    if let Some(error_msg) = input.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let employee = state.service.create(&input).await?;
    Ok(Json(employee))
}

/// Handler for DELETE /api/v1/employees/:id
///
/// Responds with the deleted employee's name.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<String>> {
    info!("Deleting employee with id: {}", id);
    let id = parse_id(&id)?;
    let name = state.service.delete_by_id(id).await?;
    Ok(Json(name))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache().stats().await;

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.expired,
        stats.total_entries,
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::InMemoryUpstream;

    fn test_state(employees: Vec<Employee>) -> (Arc<InMemoryUpstream>, AppState) {
        let upstream = Arc::new(InMemoryUpstream::with_employees(employees));
        let state = AppState::with_upstream(upstream.clone(), &Config::default());
        (upstream, state)
    }

    #[tokio::test]
    async fn test_create_and_get_handler() {
        let (upstream, state) = test_state(vec![]);

        let input = CreateEmployeeInput {
            name: "John Doe".to_string(),
            salary: 100000,
            age: 30,
            title: "Software Engineer".to_string(),
        };
        let created = create_handler(State(state.clone()), Ok(Json(input))).await.unwrap();
        let id = created.id.unwrap();

        let fetched = get_by_id_handler(State(state), Path(id.to_string()))
            .await
            .unwrap();
        assert_eq!(fetched.name.as_deref(), Some("John Doe"));
        assert_eq!(upstream.fetch_by_id_calls(), 0);
    }

    #[tokio::test]
    async fn test_get_by_invalid_id() {
        let (_, state) = test_state(vec![]);

        let result = get_by_id_handler(State(state), Path("not-a-uuid".to_string())).await;
        assert!(matches!(result, Err(ServiceError::InvalidId(_))));
    }

    #[tokio::test]
    async fn test_get_nonexistent_employee() {
        let (_, state) = test_state(vec![]);

        let result = get_by_id_handler(State(state), Path(Uuid::new_v4().to_string())).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let id = Uuid::new_v4();
        let (_, state) = test_state(vec![Employee::new(id, "Jane Smith")]);

        let name = delete_handler(State(state), Path(id.to_string())).await.unwrap();
        assert_eq!(name.0, "Jane Smith");
    }

    #[tokio::test]
    async fn test_create_invalid_request() {
        let (upstream, state) = test_state(vec![]);

        let input = CreateEmployeeInput {
            name: "".to_string(),
            salary: 100000,
            age: 30,
            title: "Engineer".to_string(),
        };
        let result = create_handler(State(state), Ok(Json(input))).await;
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
        assert_eq!(upstream.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (_, state) = test_state(vec![]);

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
