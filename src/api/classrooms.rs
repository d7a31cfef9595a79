//! Classroom endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::occupancy::{ClassroomOccupancy, OccupancyQuery},
};

/// Hourly occupancy of a classroom in a semester
#[utoipa::path(
    get,
    path = "/classrooms/{id}/occupancy",
    tag = "classrooms",
    params(
        ("id" = Uuid, Path, description = "Classroom ID"),
        OccupancyQuery
    ),
    responses(
        (status = 200, description = "Occupancy grid", body = ClassroomOccupancy),
        (status = 404, description = "Classroom or semester not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_occupancy(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<OccupancyQuery>,
) -> AppResult<Json<ClassroomOccupancy>> {
    let occupancy = state
        .services
        .occupancy
        .classroom_occupancy(id, query.semester_id)
        .await?;
    Ok(Json(occupancy))
}
