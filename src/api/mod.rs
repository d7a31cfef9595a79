//! API handlers for Aules REST endpoints

pub mod alternatives;
pub mod assignments;
pub mod availability;
pub mod classrooms;
pub mod health;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Availability
        .route("/availability/check", post(availability::check_availability))
        // Alternatives
        .route("/alternatives/search", post(alternatives::search_alternatives))
        .route("/alternatives/filter-options", get(alternatives::filter_options))
        // Assignments
        .route("/assignments/validate", post(assignments::validate_assignment))
        // Classrooms
        .route("/classrooms/:id/occupancy", get(classrooms::get_occupancy))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
