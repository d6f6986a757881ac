//! REST API router and configuration.

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::{
    add_personal_event_handler, analytics_handler, calendar_month_handler, create_quiz_handler,
    delete_quiz_handler, list_quizzes_handler, suggest_date_handler, suggest_quizzes_handler,
    update_quiz_handler, ApiState,
};

/// REST API configuration.
#[derive(Debug, Clone)]
pub struct RestApiConfig {
    /// Enable CORS.
    pub enable_cors: bool,
    /// API prefix (e.g., "/api/v1").
    pub prefix: String,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            prefix: "/api/v1".to_string(),
        }
    }
}

/// Create the REST API router.
///
/// Endpoints:
/// - GET    /api/v1/quizzes              - List quizzes
/// - POST   /api/v1/quizzes              - Create a quiz
/// - PUT    /api/v1/quizzes/:id          - Update a quiz
/// - DELETE /api/v1/quizzes/:id          - Delete a quiz
/// - GET    /api/v1/calendar/:year/:month - Aggregated month grid
/// - POST   /api/v1/calendar/events      - Add a personal event
/// - GET    /api/v1/analytics            - Quiz statistics
/// - POST   /api/v1/suggestions/quizzes  - AI quiz ideas
/// - POST   /api/v1/suggestions/date     - AI publication date suggestion
pub fn create_rest_router(state: Arc<ApiState>, config: &RestApiConfig) -> Router {
    let api_routes = Router::new()
        .route("/quizzes", get(list_quizzes_handler).post(create_quiz_handler))
        .route("/quizzes/:id", put(update_quiz_handler).delete(delete_quiz_handler))
        .route("/calendar/:year/:month", get(calendar_month_handler))
        .route("/calendar/events", post(add_personal_event_handler))
        .route("/analytics", get(analytics_handler))
        .route("/suggestions/quizzes", post(suggest_quizzes_handler))
        .route("/suggestions/date", post(suggest_date_handler))
        .with_state(state);

    let router = Router::new()
        .nest(&config.prefix, api_routes)
        .route("/api", get(api_info_handler));

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(Any);

        router.layer(cors)
    } else {
        router
    }
}

/// API info handler.
async fn api_info_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "Quizboard REST API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "REST API for the quiz planning dashboard",
        "endpoints": {
            "list_quizzes": { "method": "GET", "path": "/api/v1/quizzes" },
            "create_quiz": { "method": "POST", "path": "/api/v1/quizzes" },
            "update_quiz": { "method": "PUT", "path": "/api/v1/quizzes/:id" },
            "delete_quiz": { "method": "DELETE", "path": "/api/v1/quizzes/:id" },
            "calendar": {
                "method": "GET",
                "path": "/api/v1/calendar/:year/:month",
                "description": "Monday-first month grid with quizzes, holidays, world days and personal events"
            },
            "add_personal_event": { "method": "POST", "path": "/api/v1/calendar/events" },
            "analytics": { "method": "GET", "path": "/api/v1/analytics" },
            "suggest_quizzes": { "method": "POST", "path": "/api/v1/suggestions/quizzes" },
            "suggest_date": { "method": "POST", "path": "/api/v1/suggestions/date" }
        }
    }))
}
