//! Availability endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::availability::{Availability, AvailabilityRequest},
};

/// Check whether a classroom is free for a slot and a set of weeks
#[utoipa::path(
    post,
    path = "/availability/check",
    tag = "availability",
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Available, conflicting or unknown", body = Availability),
        (status = 400, description = "Invalid weeks or time slot", body = crate::error::ErrorResponse),
        (status = 404, description = "Classroom, time slot or semester not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    Json(request): Json<AvailabilityRequest>,
) -> AppResult<Json<Availability>> {
    let availability = state.services.availability.check(&request).await?;
    Ok(Json(availability))
}
