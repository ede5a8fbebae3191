//! Response DTOs for the employee cache
//!
//! Defines the upstream result envelope and the bodies of our own endpoints.

use serde::{Deserialize, Serialize};

/// Status carried by results answered from the cache.
pub const STATUS_SUCCESS: &str = "Successfully processed request.";

/// Result envelope shared by the upstream service and the cache.
///
/// A success status without data means "no data", not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerResponse<T> {
    /// Payload, absent when upstream had nothing to return
    pub data: Option<T>,
    /// Upstream status text
    #[serde(default)]
    pub status: String,
    /// Error detail reported by upstream, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ServerResponse<T> {
    /// Creates a successful envelope around `data`
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            status: STATUS_SUCCESS.to_string(),
            error: None,
        }
    }

    /// Creates a successful envelope with no payload
    pub fn empty() -> Self {
        Self {
            data: None,
            status: STATUS_SUCCESS.to_string(),
            error: None,
        }
    }

    /// Consumes the envelope, returning its payload
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that fell through to upstream
    pub misses: u64,
    /// Entries removed after a confirmed delete
    pub evictions: u64,
    /// Expired entries purged by the sweep
    pub expired: u64,
    /// Entries physically held, including expired ones not yet purged
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(hits: u64, misses: u64, evictions: u64, expired: u64, total_entries: usize) -> Self {
        let total_requests = hits + misses;
        let hit_rate = if total_requests > 0 {
            hits as f64 / total_requests as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            evictions,
            expired,
            total_entries,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;

    #[test]
    fn test_server_response_deserialize() {
        let json = r#"{"data": [1, 2, 3], "status": "Successfully processed request."}"#;
        let resp: ServerResponse<Vec<u32>> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data, Some(vec![1, 2, 3]));
        assert_eq!(resp.status, STATUS_SUCCESS);
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_server_response_null_data() {
        let json = r#"{"data": null, "status": "Successfully processed request."}"#;
        let resp: ServerResponse<bool> = serde_json::from_str(json).unwrap();
        assert!(resp.data.is_none());

        let resp: ServerResponse<bool> = serde_json::from_str("{}").unwrap();
        assert!(resp.data.is_none());
        assert!(resp.status.is_empty());
    }

    #[test]
    fn test_server_response_missing_data_decodes_as_none() {
        let json = r#"{"status": "Successfully processed request."}"#;

        let single: ServerResponse<Employee> = serde_json::from_str(json).unwrap();
        assert!(single.data.is_none());
        assert_eq!(single.status, STATUS_SUCCESS);

        let list: ServerResponse<Vec<Employee>> = serde_json::from_str(json).unwrap();
        assert!(list.data.is_none());
    }

    #[test]
    fn test_server_response_employee_payload() {
        let json = r#"{
            "data": {"id": "4a3a170b-22cd-4ac2-aad1-9bb5b34a1507", "employee_name": "John Doe"},
            "status": "Successfully processed request."
        }"#;
        let resp: ServerResponse<Employee> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_data().unwrap().name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_server_response_constructors() {
        let resp = ServerResponse::success(true);
        assert_eq!(resp.status, STATUS_SUCCESS);
        assert_eq!(resp.into_data(), Some(true));

        let resp: ServerResponse<bool> = ServerResponse::empty();
        assert!(resp.into_data().is_none());
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let resp = StatsResponse::new(80, 20, 5, 3, 100);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::new(0, 0, 0, 0, 0);
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
