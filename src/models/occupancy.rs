//! Classroom occupancy over the weekly hourly grid

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Query parameters for the occupancy endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct OccupancyQuery {
    pub semester_id: Uuid,
}

/// What occupies an hourly cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CellAssignment {
    pub assignment_id: Uuid,
    pub subject_name: String,
    pub group_code: Option<String>,
}

/// One hour of one weekday
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HourlyCell {
    /// 1=Monday .. 5=Friday
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_occupied: bool,
    pub assignment: Option<CellAssignment>,
}

/// Occupancy of one classroom in one semester
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassroomOccupancy {
    pub classroom_id: Uuid,
    pub semester_id: Uuid,
    /// Percentages, 0-100
    pub morning_occupancy: u8,
    pub afternoon_occupancy: u8,
    pub total_occupancy: u8,
    pub cells: Vec<HourlyCell>,
}
