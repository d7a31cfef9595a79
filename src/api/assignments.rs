//! Assignment validation endpoint

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::validation::{AssignmentValidationRequest, ValidationReport},
};

/// Validate a proposed classroom assignment
#[utoipa::path(
    post,
    path = "/assignments/validate",
    tag = "assignments",
    request_body = AssignmentValidationRequest,
    responses(
        (status = 200, description = "Validation report", body = ValidationReport),
        (status = 404, description = "Classroom or group not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn validate_assignment(
    State(state): State<crate::AppState>,
    Json(request): Json<AssignmentValidationRequest>,
) -> AppResult<Json<ValidationReport>> {
    let report = state.services.validation.validate(&request).await?;
    Ok(Json(report))
}
