//! API Module
//!
//! HTTP handlers and routing for the employee REST API.
//!
//! # Endpoints
//! - `GET /api/v1/employees` - List all employees
//! - `POST /api/v1/employees` - Create an employee
//! - `GET /api/v1/employees/:id` - Fetch one employee
//! - `DELETE /api/v1/employees/:id` - Delete one employee
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, EMPLOYEES_PATH};
