//! API Routes
//!
//! Configures the Axum router with all employee endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, get_all_handler, get_by_id_handler, health_handler,
    stats_handler, AppState,
};

/// Base path of the employee resource.
pub const EMPLOYEES_PATH: &str = "/api/v1/employees";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/v1/employees` - List all employees
/// - `POST /api/v1/employees` - Create an employee
/// - `GET /api/v1/employees/:id` - Fetch one employee
/// - `DELETE /api/v1/employees/:id` - Delete one employee
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(EMPLOYEES_PATH, get(get_all_handler).post(create_handler))
        .route(
            &format!("{}/:id", EMPLOYEES_PATH),
            get(get_by_id_handler).delete(delete_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
