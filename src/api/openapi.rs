//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{alternatives, assignments, availability, classrooms, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Aules API",
        version = "1.0.0",
        description = "Classroom availability and alternative search REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Availability
        availability::check_availability,
        // Alternatives
        alternatives::search_alternatives,
        alternatives::filter_options,
        // Assignments
        assignments::validate_assignment,
        // Classrooms
        classrooms::get_occupancy,
    ),
    components(
        schemas(
            // Scheduling
            crate::models::week_set::WeekSet,
            crate::models::schedule::Semester,
            crate::models::schedule::TimeSlot,
            crate::models::reservation::ConflictDetail,
            // Availability
            crate::models::availability::AvailabilityRequest,
            crate::models::availability::Availability,
            // Alternatives
            crate::models::availability::AlternativeSearchRequest,
            crate::models::availability::AlternativeSearchResponse,
            crate::models::availability::CandidateClassroom,
            crate::models::availability::FilterOptions,
            crate::models::classroom::Classroom,
            crate::models::classroom::ClassroomType,
            crate::models::equipment::EquipmentType,
            crate::models::equipment::Software,
            // Assignments
            crate::models::validation::AssignmentValidationRequest,
            crate::models::validation::ValidationReport,
            // Occupancy
            crate::models::occupancy::ClassroomOccupancy,
            crate::models::occupancy::HourlyCell,
            crate::models::occupancy::CellAssignment,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Classroom availability checks"),
        (name = "alternatives", description = "Alternative classroom search"),
        (name = "assignments", description = "Assignment validation"),
        (name = "classrooms", description = "Classroom occupancy")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
