//! Availability and alternative-search requests and results

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{
    classroom::{Classroom, ClassroomFilter, ClassroomType},
    equipment::{EquipmentType, Software},
    reservation::ConflictDetail,
    week_set::WeekSet,
};

/// Check one classroom for a slot and a set of weeks
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AvailabilityRequest {
    pub classroom_id: Uuid,
    pub time_slot_id: Uuid,
    pub semester_id: Uuid,
    pub weeks: WeekSet,
    /// Assignment being edited
    pub exclude_assignment_id: Option<Uuid>,
}

/// Outcome of an availability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    Available,
    Conflict { conflicts: Vec<ConflictDetail> },
    /// The reservations could not be read; nothing is known about the classroom
    Unknown { reason: String },
}

impl Availability {
    pub fn from_conflicts(conflicts: Vec<ConflictDetail>) -> Self {
        if conflicts.is_empty() {
            Availability::Available
        } else {
            Availability::Conflict { conflicts }
        }
    }

    /// `Some(true)` when free, `Some(false)` on conflict, `None` when unknown
    pub fn is_available(&self) -> Option<bool> {
        match self {
            Availability::Available => Some(true),
            Availability::Conflict { .. } => Some(false),
            Availability::Unknown { .. } => None,
        }
    }
}

/// Static requirements a substitute classroom must meet
#[derive(Debug, Clone, Default)]
pub struct AlternativeCriteria {
    pub min_capacity: Option<i32>,
    pub classroom_type: Option<ClassroomType>,
    pub equipment_type_ids: Vec<Uuid>,
    pub software_ids: Vec<Uuid>,
}

impl AlternativeCriteria {
    pub fn catalog_filter(&self) -> ClassroomFilter {
        ClassroomFilter {
            classroom_type: self.classroom_type,
            min_capacity: self.min_capacity.filter(|c| *c > 0),
        }
    }
}

/// Search for substitute classrooms
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct AlternativeSearchRequest {
    pub time_slot_id: Uuid,
    pub semester_id: Uuid,
    pub weeks: WeekSet,
    #[validate(range(min = 0, message = "min_capacity cannot be negative"))]
    pub min_capacity: Option<i32>,
    pub classroom_type: Option<ClassroomType>,
    #[serde(default)]
    pub equipment_type_ids: Vec<Uuid>,
    #[serde(default)]
    pub software_ids: Vec<Uuid>,
    pub exclude_assignment_id: Option<Uuid>,
    /// Searches sharing a key replace each other; only the newest result is returned
    #[validate(length(min = 1, max = 128, message = "search_key must be 1-128 characters"))]
    pub search_key: Option<String>,
}

impl AlternativeSearchRequest {
    pub fn criteria(&self) -> AlternativeCriteria {
        AlternativeCriteria {
            min_capacity: self.min_capacity,
            classroom_type: self.classroom_type,
            equipment_type_ids: self.equipment_type_ids.clone(),
            software_ids: self.software_ids.clone(),
        }
    }
}

/// A classroom meeting the static criteria, tagged with its availability
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandidateClassroom {
    pub classroom: Classroom,
    pub equipment: Vec<EquipmentType>,
    pub software: Vec<Software>,
    pub is_available: bool,
    /// Reservations blocking the classroom (empty when available)
    pub conflicts: Vec<ConflictDetail>,
}

/// Ordered search result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AlternativeSearchResponse {
    /// Generation of a keyed search
    pub generation: Option<u64>,
    pub available_count: usize,
    pub total_count: usize,
    pub candidates: Vec<CandidateClassroom>,
}

/// Values the search filters can take
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FilterOptions {
    /// Types present in the catalog, in the form the search accepts
    pub classroom_types: Vec<ClassroomType>,
    pub equipment_types: Vec<EquipmentType>,
    pub software: Vec<Software>,
}
