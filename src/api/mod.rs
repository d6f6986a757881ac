//! REST API for the dashboard.

mod handlers;
mod rest;

pub use handlers::ApiState;
pub use rest::{create_rest_router, RestApiConfig};
